//! Persisted favorite row.
//!
//! A flat projection of `Movie` + `Poster`, one row per movie id.

use crate::model::{Movie, Poster};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    /// Insertion order; favorites are listed newest first.
    pub seq: i64,
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: String,
    pub trailer: String,
    pub poster_path_tiny: String,
    pub poster_path_large: String,
    pub image_tiny: Option<Vec<u8>>,
    pub image_large: Option<Vec<u8>>,
    pub favorited: bool,
    pub genre: String,
    pub price: String,
    pub saved_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for FavoriteRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            seq: row.try_get("seq")?,
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            year: row.try_get("year")?,
            trailer: row.try_get("trailer")?,
            poster_path_tiny: row.try_get("poster_path_tiny")?,
            poster_path_large: row.try_get("poster_path_large")?,
            image_tiny: row.try_get("image_tiny")?,
            image_large: row.try_get("image_large")?,
            favorited: row.try_get("favorited")?,
            genre: row.try_get("genre")?,
            price: row.try_get("price")?,
            saved_at: row.try_get("saved_at")?,
        })
    }
}

impl From<FavoriteRecord> for Movie {
    fn from(record: FavoriteRecord) -> Self {
        Movie {
            id: record.id,
            title: record.title,
            description: record.description,
            year: record.year,
            trailer: record.trailer,
            favorited: record.favorited,
            price: record.price,
            genre: record.genre,
            poster: Poster {
                tiny: record.poster_path_tiny,
                large: record.poster_path_large,
                image_tiny: record.image_tiny,
                image_large: record.image_large,
            },
        }
    }
}
