use super::model::FavoriteRecord;
use crate::error::FavoriteError;
use crate::model::Movie;
use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, instrument};

pub type Pool = SqlitePool;

pub async fn init_pool(database_url: &str) -> Result<Pool> {
    let normalized = prepare_sqlite_url(database_url);
    // WAL with full durability; favorites are written one at a time.
    let options = SqliteConnectOptions::from_str(&normalized)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Full);
    let pool = SqlitePool::connect_with(options).await?;
    Ok(pool)
}

/// Expand a leading `~/` in a file-backed SQLite URL and create its parent
/// directory. In-memory and non-sqlite URLs pass through untouched.
fn prepare_sqlite_url(url: &str) -> String {
    let Some(rest) = url.strip_prefix("sqlite:") else {
        return url.to_string();
    };
    if rest.starts_with(":memory") {
        return url.to_string();
    }

    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let (path, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };
    if path.is_empty() {
        return url.to_string();
    }

    let path = match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(tail), Ok(home)) => format!("{}/{}", home.trim_end_matches('/'), tail),
        _ => path.to_string(),
    };

    if let Some(parent) = std::path::Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    match query {
        Some(q) => format!("sqlite://{}?{}", path, q),
        None => format!("sqlite://{}", path),
    }
}

pub async fn run_migrations(pool: &Pool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[instrument(skip_all, fields(id = %id))]
pub async fn favorite_exists(pool: &Pool, id: &str) -> Result<bool, FavoriteError> {
    let seq = sqlx::query_scalar::<_, i64>("SELECT seq FROM favorites WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(seq.is_some())
}

/// Insert a snapshot of `movie`. Fails with `AlreadyExists` when a row with the
/// same id is present; the check and the insert share one transaction.
#[instrument(skip_all, fields(id = %movie.id))]
pub async fn insert_favorite(pool: &Pool, movie: &Movie) -> Result<(), FavoriteError> {
    let mut tx = pool.begin().await?;
    let existing = sqlx::query_scalar::<_, i64>("SELECT seq FROM favorites WHERE id = ? LIMIT 1")
        .bind(&movie.id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_some() {
        return Err(FavoriteError::AlreadyExists(movie.id.clone()));
    }

    sqlx::query(
        "INSERT INTO favorites (id, title, description, year, trailer, poster_path_tiny, poster_path_large, image_tiny, image_large, favorited, genre, price, saved_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&movie.id)
    .bind(&movie.title)
    .bind(&movie.description)
    .bind(&movie.year)
    .bind(&movie.trailer)
    .bind(&movie.poster.tiny)
    .bind(&movie.poster.large)
    .bind(movie.poster.image_tiny.as_deref())
    .bind(movie.poster.image_large.as_deref())
    .bind(movie.favorited)
    .bind(&movie.genre)
    .bind(&movie.price)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    debug!("favorite stored");
    Ok(())
}

/// Delete the row for `id`. Fails with `DoesNotExist` when there is none.
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_favorite(pool: &Pool, id: &str) -> Result<(), FavoriteError> {
    let mut tx = pool.begin().await?;
    let existing = sqlx::query_scalar::<_, i64>("SELECT seq FROM favorites WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        return Err(FavoriteError::DoesNotExist(id.to_string()));
    }

    sqlx::query("DELETE FROM favorites WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    debug!("favorite removed");
    Ok(())
}

/// All favorites, most recently added first.
#[instrument(skip_all)]
pub async fn list_favorites(pool: &Pool) -> Result<Vec<FavoriteRecord>, FavoriteError> {
    let rows = sqlx::query_as::<_, FavoriteRecord>(
        "SELECT seq, id, title, description, year, trailer, poster_path_tiny, poster_path_large, \
                image_tiny, image_large, favorited, genre, price, saved_at \
         FROM favorites ORDER BY seq DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
