//! Database operations for the catalog `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `brands`, `categories`, `menus` - hierarchical entities (two-level)
//! - `products` - flat catalog, referencing brands/categories
//! - `orders` - checkout output, status-managed from the dashboard
//! - `banners` - homepage carousel, explicitly sequenced
//! - `social_links` - footer links
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p copperleaf-cli -- migrate
//! ```
//!
//! Queries are runtime-checked (`sqlx::query`/`query_as` with `FromRow` row
//! structs); the repo carries no offline query cache.

pub mod banners;
pub mod brands;
pub mod categories;
mod hierarchy;
pub mod menus;
pub mod orders;
pub mod products;
pub mod social_links;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use banners::BannerRepository;
pub use brands::BrandRepository;
pub use categories::CategoryRepository;
pub use menus::MenuRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use social_links::SocialLinkRepository;

use copperleaf_core::slug::SlugError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation, naming the offending field and value.
    #[error("a record with {field} \"{value}\" already exists")]
    Conflict { field: &'static str, value: String },

    /// Parent reference is missing, too deep, or self-referential.
    #[error("{0}")]
    InvalidParent(String),

    /// The display name yields no usable slug.
    #[error(transparent)]
    Slug(#[from] SlugError),
}

/// Map a unique-index violation on insert/update to a `Conflict` naming the
/// offending field, based on which constraint fired. Any other error passes
/// through as `Database`.
pub(crate) fn map_unique_violation(
    err: sqlx::Error,
    fields: &[(&'static str, &str)],
) -> RepositoryError {
    if let sqlx::Error::Database(db) = &err {
        if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            let constraint = db.constraint().unwrap_or_default();
            for (field, value) in fields {
                if constraint.contains(field) {
                    return RepositoryError::Conflict {
                        field,
                        value: (*value).to_string(),
                    };
                }
            }
        }
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
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
