//! Navigation intents emitted by the view models and interpreted by the
//! caller-owned presentation layer.
use crate::model::Movie;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Show the detail screen for a movie. The presenter wires the detail
    /// favorite button back to the home screen.
    Detail { movie: Movie },
    Toast(Toast),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub image: String,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn new(
        image: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn added(movie: &Movie) -> Self {
        Self::new("heart.fill", "Added to favorite", movie.title.clone())
    }

    pub fn removed(movie: &Movie) -> Self {
        Self::new("heart", "Removed from favorite", movie.title.clone())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new("exclamationmark.triangle", "Something went wrong", message)
    }
}

/// Called by the detail screen with the movie whose favorite button was used.
pub type FavoriteCompletion = Box<dyn Fn(Movie) + Send + Sync>;
