//! CLI command implementations.

pub mod migrate;
pub mod seed;

use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] copperleaf_api::db::RepositoryError),
}

/// Resolve the database URL from the environment.
pub(crate) fn database_url() -> Result<String, CommandError> {
    dotenvy::dotenv().ok();
    std::env::var("COPPERLEAF_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("COPPERLEAF_DATABASE_URL"))
}
