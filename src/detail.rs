//! Detail screen for a single movie.
use tracing::{debug, warn};

use crate::model::{Movie, Poster};
use crate::route::FavoriteCompletion;
use crate::usecase::DetailUseCase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSection {
    /// Poster, title, year, genre, price and description.
    Header(Movie),
    Trailer(Movie),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailButton {
    Buy,
    Favorite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub data_sources: Vec<DetailSection>,
    pub poster: Poster,
}

pub struct DetailViewModel {
    use_case: DetailUseCase,
    movie: Movie,
    favorite_completion: Option<FavoriteCompletion>,
}

impl DetailViewModel {
    pub fn new(
        use_case: DetailUseCase,
        movie: Movie,
        favorite_completion: Option<FavoriteCompletion>,
    ) -> Self {
        Self {
            use_case,
            movie,
            favorite_completion,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    /// Refresh the favorite flag from storage and build the sections.
    pub async fn load(&mut self) -> DetailState {
        self.refresh_favorited().await;
        DetailState {
            data_sources: vec![
                DetailSection::Header(self.movie.clone()),
                DetailSection::Trailer(self.movie.clone()),
            ],
            poster: self.movie.poster.clone(),
        }
    }

    /// Returns the movie handed to the favorite completion, if one ran.
    pub async fn button_did_tap(&mut self, button: DetailButton) -> Option<Movie> {
        self.refresh_favorited().await;
        match button {
            DetailButton::Favorite => {
                let movie = self.movie.clone();
                if let Some(completion) = &self.favorite_completion {
                    completion(movie.clone());
                }
                Some(movie)
            }
            DetailButton::Buy => {
                debug!(id = %self.movie.id, price = %self.movie.price, "buy tapped");
                None
            }
        }
    }

    async fn refresh_favorited(&mut self) {
        match self.use_case.check_favorite_status(&self.movie).await {
            Ok(favorited) => self.movie.favorited = favorited,
            Err(err) => warn!(id = %self.movie.id, ?err, "favorite status lookup failed"),
        }
    }
}
