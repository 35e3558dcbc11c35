//! Business rules on top of [`MovieRepository`].
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use crate::error::{FavoriteError, NetworkError};
use crate::model::Movie;
use crate::repository::MovieRepository;

pub struct HomeUseCase {
    repository: Arc<dyn MovieRepository>,
    saved_movies: Mutex<Vec<Movie>>,
}

impl HomeUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self {
            repository,
            saved_movies: Mutex::new(Vec::new()),
        }
    }

    /// Search, then mark each result favorited or not with one lookup per
    /// movie. A failed lookup counts as not favorited.
    #[instrument(skip(self))]
    pub async fn search_movies(
        &self,
        keyword: &str,
        genre: &str,
        limit: u32,
    ) -> Result<Vec<Movie>, NetworkError> {
        let movies = self.repository.search_movies(keyword, genre, limit).await?;
        let mut annotated = Vec::with_capacity(movies.len());
        for movie in movies {
            let favorited = match self.repository.check_favorite_status(&movie).await {
                Ok(favorited) => favorited,
                Err(err) => {
                    warn!(id = %movie.id, ?err, "favorite status lookup failed");
                    false
                }
            };
            annotated.push(movie.with_favorited(favorited));
        }
        Ok(annotated)
    }

    /// Download both poster sizes, then persist the movie as favorited. The
    /// returned future completes only once the bytes are stored.
    #[instrument(skip_all, fields(id = %movie.id))]
    pub async fn save_favorite(&self, mut movie: Movie) -> Result<Movie, FavoriteError> {
        let (tiny, large) = futures::join!(
            self.repository.get_image_data(&movie.poster.tiny),
            self.repository.get_image_data(&movie.poster.large),
        );
        movie.poster.image_tiny = tiny;
        movie.poster.image_large = large;
        movie.favorited = true;
        self.repository.save_favorite(&movie).await
    }

    #[instrument(skip_all, fields(id = %movie.id))]
    pub async fn delete_favorite(&self, movie: Movie) -> Result<Movie, FavoriteError> {
        let removed = self.repository.delete(&movie).await?;
        Ok(removed.with_favorited(false))
    }

    /// Load favorites and remember them for [`HomeUseCase::saved_movies`].
    pub async fn get_favorites(&self) -> Result<Vec<Movie>, FavoriteError> {
        let favorites = self.repository.get_favorites().await?;
        *self.saved_movies.lock().await = favorites.clone();
        Ok(favorites)
    }

    /// Favorites from the last successful [`HomeUseCase::get_favorites`].
    pub async fn saved_movies(&self) -> Vec<Movie> {
        self.saved_movies.lock().await.clone()
    }

    pub async fn check_favorite_status(&self, movie: &Movie) -> Result<bool, FavoriteError> {
        self.repository.check_favorite_status(movie).await
    }

    pub async fn is_connected(&self) -> bool {
        self.repository.is_connected().await
    }
}

pub struct DetailUseCase {
    repository: Arc<dyn MovieRepository>,
}

impl DetailUseCase {
    pub fn new(repository: Arc<dyn MovieRepository>) -> Self {
        Self { repository }
    }

    pub async fn check_favorite_status(&self, movie: &Movie) -> Result<bool, FavoriteError> {
        self.repository.check_favorite_status(movie).await
    }
}
