//! Inputs and outputs of the home reducer.
//!
//! [`HomeAction`]s come from the user (load, search, taps, column toggle) or
//! from finished effects (`*Loaded`, `Favorite*`). The reducer answers each
//! action with a list of [`Effect`]s for the view model to run.

use crate::error::{FavoriteError, NetworkError};
use crate::home::state::SectionKind;
use crate::model::Movie;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tap {
    Single,
    Double,
}

/// A tap on a movie cell, identified by section and movie id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTap {
    pub section: SectionKind,
    pub tap: Tap,
    pub id: String,
}

impl SectionTap {
    pub fn favorite(tap: Tap, id: impl Into<String>) -> Self {
        Self {
            section: SectionKind::Favorites,
            tap,
            id: id.into(),
        }
    }

    pub fn list(tap: Tap, id: impl Into<String>) -> Self {
        Self {
            section: SectionKind::Lists,
            tap,
            id: id.into(),
        }
    }
}

#[derive(Debug)]
pub enum HomeAction {
    DidLoad,
    SearchDidChange(String),
    SearchDidCancel,
    GetMovies,
    GetFavorites,
    MovieTapped(SectionTap),
    /// The detail screen's favorite button was used for this movie.
    MovieCompletion(Movie),
    ColumnButtonDidTap,

    MoviesLoaded {
        generation: u64,
        result: Result<Vec<Movie>, NetworkError>,
        /// Favorites cached by the use case when the search finished.
        saved: Vec<Movie>,
    },
    FavoritesLoaded {
        result: Result<Vec<Movie>, FavoriteError>,
        /// Connectivity; only probed when the favorites list came back empty.
        connected: bool,
    },
    FavoriteSaved {
        movie: Movie,
        result: Result<Movie, FavoriteError>,
    },
    FavoriteRemoved {
        movie: Movie,
        result: Result<Movie, FavoriteError>,
    },
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchMovies {
        generation: u64,
        keyword: String,
        genre: String,
        limit: u32,
    },
    LoadFavorites,
    SaveFavorite(Movie),
    DeleteFavorite(Movie),
    Navigate(Route),
}
