use serde::{Deserialize, Serialize};

/// Poster artwork for a movie. Image bytes are filled in when the movie is
/// saved as a favorite so the poster can be shown offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Poster {
    pub tiny: String,
    pub large: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tiny: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_large: Option<Vec<u8>>,
}

impl Poster {
    pub fn new(tiny: impl Into<String>, large: impl Into<String>) -> Self {
        Self {
            tiny: tiny.into(),
            large: large.into(),
            image_tiny: None,
            image_large: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: String,
    /// Preview video URL.
    pub trailer: String,
    pub favorited: bool,
    pub price: String,
    pub genre: String,
    pub poster: Poster,
}

impl Movie {
    pub fn with_favorited(mut self, favorited: bool) -> Self {
        self.favorited = favorited;
        self
    }
}
