//! The movie repository: iTunes search, the favorites store and poster images
//! behind one trait.
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::{self, Pool};
use crate::error::{FavoriteError, NetworkError};
use crate::images::ImageLoader;
use crate::itunes::SearchMovieRequest;
use crate::model::Movie;
use crate::net::Networking;

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn search_movies(
        &self,
        keyword: &str,
        genre: &str,
        limit: u32,
    ) -> Result<Vec<Movie>, NetworkError>;

    /// Persist the movie as given, poster bytes included. Fails with
    /// `AlreadyExists` when the id is already saved.
    async fn save_favorite(&self, movie: &Movie) -> Result<Movie, FavoriteError>;

    /// Favorites, most recently added first.
    async fn get_favorites(&self) -> Result<Vec<Movie>, FavoriteError>;

    /// Fails with `DoesNotExist` when the id is not saved.
    async fn delete(&self, movie: &Movie) -> Result<Movie, FavoriteError>;

    async fn check_favorite_status(&self, movie: &Movie) -> Result<bool, FavoriteError>;

    async fn get_image_data(&self, url: &str) -> Option<Vec<u8>>;

    async fn is_connected(&self) -> bool;
}

pub struct ItunesMovieRepository {
    network: Networking,
    pool: Pool,
    images: Arc<dyn ImageLoader>,
    base_url: String,
}

impl fmt::Debug for ItunesMovieRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItunesMovieRepository")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ItunesMovieRepository {
    pub fn new(
        network: Networking,
        pool: Pool,
        images: Arc<dyn ImageLoader>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            network,
            pool,
            images,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl MovieRepository for ItunesMovieRepository {
    #[instrument(skip(self))]
    async fn search_movies(
        &self,
        keyword: &str,
        genre: &str,
        limit: u32,
    ) -> Result<Vec<Movie>, NetworkError> {
        let request = SearchMovieRequest::new(self.base_url.clone(), keyword, genre, limit);
        let movies = self.network.request(&request).await?;
        info!(count = movies.len(), "search completed");
        Ok(movies)
    }

    async fn save_favorite(&self, movie: &Movie) -> Result<Movie, FavoriteError> {
        db::insert_favorite(&self.pool, movie).await?;
        info!(id = %movie.id, title = %movie.title, "saved favorite");
        Ok(movie.clone())
    }

    async fn get_favorites(&self) -> Result<Vec<Movie>, FavoriteError> {
        let records = db::list_favorites(&self.pool).await?;
        Ok(records.into_iter().map(Movie::from).collect())
    }

    async fn delete(&self, movie: &Movie) -> Result<Movie, FavoriteError> {
        db::delete_favorite(&self.pool, &movie.id).await?;
        info!(id = %movie.id, title = %movie.title, "removed favorite");
        Ok(movie.clone())
    }

    async fn check_favorite_status(&self, movie: &Movie) -> Result<bool, FavoriteError> {
        db::favorite_exists(&self.pool, &movie.id).await
    }

    async fn get_image_data(&self, url: &str) -> Option<Vec<u8>> {
        self.images.load(url).await
    }

    async fn is_connected(&self) -> bool {
        self.network.is_connected().await
    }
}
