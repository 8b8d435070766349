pub mod models;
pub mod repositories;

mod error;

use anyhow::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

pub use error::DatabaseError;

/// Initialize the database connection pool and run embedded migrations.
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.unwrap_or(10))
        .min_connections(config.min_connections.unwrap_or(1))
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
