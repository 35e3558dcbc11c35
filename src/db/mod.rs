//! Database module: the favorites table and its SQL functions.
//!
//! - `model`: the persisted favorite row and its mapping to [`crate::model::Movie`].
//! - `repo`: pool setup, migrations and SQL-only functions over `favorites`.
//!
//! The repository API is re-exported at `movie_itunes::db::*`.

pub mod model;
pub mod repo;

pub use repo::*;

pub use model::FavoriteRecord;
