//! Database migration command.
//!
//! Migration files live in `crates/api/migrations/`:
//! ```text
//! migrations/
//! ├── 20260301000001_create_brands.sql
//! ├── 20260301000002_create_categories.sql
//! └── ...
//! ```

use sqlx::PgPool;

use super::{CommandError, database_url};

/// Run catalog database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to catalog database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
