use std::str::FromStr;

use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Reads a TEXT column into one of the closed enums.
pub(crate) fn text_col<T>(row: &PgRow, column: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    Ok(raw.parse::<T>()?)
}

/// Nullable variant of [`text_col`].
pub(crate) fn opt_text_col<T>(row: &PgRow, column: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: Option<String> = row.try_get(column)?;
    Ok(raw.map(|s| s.parse::<T>()).transpose()?)
}

pub mod repositories;
