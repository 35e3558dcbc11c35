//! iTunes Search API request descriptor and response mapping.
use crate::model::{Movie, Poster};
use crate::net::ApiRequest;

pub mod model;

use model::{SearchResponse, TrackResponse};

pub const ITUNES_API_BASE: &str = "https://itunes.apple.com";

const ARTWORK_SIZE: &str = "/100x100bb";
const TINY_SIZE: &str = "/350x350bb";
const LARGE_SIZE: &str = "/750x750bb";

/// `GET /search` for movies. A non-empty `genre` switches to genre browsing
/// (`attribute=genreTerm`), otherwise `keyword` is the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieRequest {
    base_url: String,
    keyword: String,
    genre: String,
    limit: u32,
}

impl SearchMovieRequest {
    pub fn new(base_url: impl Into<String>, keyword: &str, genre: &str, limit: u32) -> Self {
        Self {
            base_url: base_url.into(),
            keyword: keyword.to_string(),
            genre: genre.to_string(),
            limit,
        }
    }
}

impl ApiRequest for SearchMovieRequest {
    type Response = Vec<Movie>;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> &str {
        "/search"
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        if self.genre.is_empty() {
            vec![
                ("term", self.keyword.clone()),
                ("media", "movie".into()),
                ("limit", self.limit.to_string()),
            ]
        } else {
            vec![
                ("term", self.genre.clone()),
                ("entity", "movie".into()),
                ("attribute", "genreTerm".into()),
                ("limit", self.limit.to_string()),
            ]
        }
    }

    fn map(&self, data: &[u8]) -> Result<Vec<Movie>, serde_json::Error> {
        let decoded: SearchResponse = serde_json::from_slice(data)?;
        Ok(decoded.results.into_iter().map(movie_from_track).collect())
    }
}

/// Derive the tiny and large poster URLs from `artworkUrl100`. URLs without
/// the `/100x100bb` marker are used as-is for both.
pub fn poster_urls(artwork_url: &str) -> (String, String) {
    if artwork_url.contains(ARTWORK_SIZE) {
        (
            artwork_url.replacen(ARTWORK_SIZE, TINY_SIZE, 1),
            artwork_url.replacen(ARTWORK_SIZE, LARGE_SIZE, 1),
        )
    } else {
        (artwork_url.to_string(), artwork_url.to_string())
    }
}

pub fn movie_from_track(track: TrackResponse) -> Movie {
    let artwork = track.artwork_url100.unwrap_or_default();
    let (tiny, large) = poster_urls(&artwork);
    let year: String = track
        .release_date
        .unwrap_or_default()
        .chars()
        .take(4)
        .collect();

    Movie {
        id: track.track_id.unwrap_or(0).to_string(),
        title: track.track_name.unwrap_or_default(),
        description: track.long_description.unwrap_or_default(),
        year,
        trailer: track.preview_url.unwrap_or_default(),
        favorited: false,
        price: track.track_price.unwrap_or(0.0).to_string(),
        genre: track.primary_genre_name.unwrap_or_default(),
        poster: Poster::new(tiny, large),
    }
}
