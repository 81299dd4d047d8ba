//! Social link repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use copperleaf_core::SocialLinkId;

use super::{RepositoryError, map_unique_violation};
use crate::models::social_link::{NewSocialLink, SocialLink, SocialLinkChanges};

#[derive(Debug, sqlx::FromRow)]
struct SocialLinkRow {
    id: i32,
    platform: String,
    url: String,
    icon: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SocialLinkRow> for SocialLink {
    fn from(row: SocialLinkRow) -> Self {
        Self {
            id: SocialLinkId::new(row.id),
            platform: row.platform,
            url: row.url,
            icon: row.icon,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT id, platform, url, icon, is_active, created_at, updated_at
    FROM social_links
";

/// Repository for social link database operations.
pub struct SocialLinkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SocialLinkRepository<'a> {
    /// Create a new social link repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all social links sorted by platform.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<SocialLink>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY platform");
        let rows: Vec<SocialLinkRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a social link by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the link does not exist.
    pub async fn get_by_id(&self, id: SocialLinkId) -> Result<SocialLink, RepositoryError> {
        let sql = format!("{SELECT} WHERE id = $1");
        let row: Option<SocialLinkRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a social link.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the platform already has a link.
    pub async fn create(&self, input: NewSocialLink) -> Result<SocialLink, RepositoryError> {
        let id: (i32,) = sqlx::query_as(
            "INSERT INTO social_links (platform, url, icon, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.platform)
        .bind(&input.url)
        .bind(&input.icon)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("platform", &input.platform)]))?;

        self.get_by_id(SocialLinkId::new(id.0)).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the link does not exist and `Conflict` if
    /// renaming collides with another platform.
    pub async fn update(
        &self,
        id: SocialLinkId,
        changes: SocialLinkChanges,
    ) -> Result<SocialLink, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let platform = changes.platform.unwrap_or(current.platform);
        let url = changes.url.unwrap_or(current.url);
        let icon = changes.icon.or(current.icon);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE social_links
             SET platform = $2, url = $3, icon = $4, is_active = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&platform)
        .bind(&url)
        .bind(&icon)
        .bind(is_active)
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("platform", &platform)]))?;

        self.get_by_id(id).await
    }

    /// Delete a social link.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the link does not exist.
    pub async fn delete(&self, id: SocialLinkId) -> Result<(), RepositoryError> {
        let deleted = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
