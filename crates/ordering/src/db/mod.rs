//! `PostgreSQL` implementations of the ordering collaborators.
//!
//! ## Tables
//!
//! - `menu_items` - catalog listings resolved by [`PgMenuCatalog`]
//! - `users` - customer profiles (birth dates) read by [`PgUserDirectory`]
//! - `orders` / `order_items` - persisted orders written by
//!   [`PgOrderRepository`]
//!
//! # Migrations
//!
//! Migrations are stored in `crates/ordering/migrations/` and run via
//! `sqlx::migrate!` from the embedding application.

pub mod menu_items;
pub mod orders;
pub mod users;

pub use menu_items::PgMenuCatalog;
pub use orders::PgOrderRepository;
pub use users::PgUserDirectory;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
