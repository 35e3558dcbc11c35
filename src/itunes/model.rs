use serde::Deserialize;

/// Envelope returned by `GET /search`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: Option<i64>,
    #[serde(default)]
    pub results: Vec<TrackResponse>,
}

/// One search hit. Only the fields mapped into [`crate::model::Movie`] are kept.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub track_id: Option<i64>,
    pub track_name: Option<String>,
    pub preview_url: Option<String>,
    pub artwork_url100: Option<String>,
    pub release_date: Option<String>,
    pub long_description: Option<String>,
    pub primary_genre_name: Option<String>,
    pub track_price: Option<f64>,
}
