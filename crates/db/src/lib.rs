//! # TableBook Storage
//!
//! Storage adapters for bookings:
//!
//! - [`local::LocalStore`]: one JSON document on local disk
//! - [`postgres::PgStore`]: a `bookings` table in PostgreSQL with live
//!   change notification over `LISTEN/NOTIFY`
//! - [`feed::Synced`]: wraps any store so its own writes reach live subscribers

pub mod feed;
pub mod local;
pub mod models;
pub mod postgres;
pub mod repositories;
pub mod schema;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
