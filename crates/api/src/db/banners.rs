//! Banner repository.
//!
//! Banners are explicitly sequenced; the reorder operation rewrites the
//! whole sequence column from a client-supplied id list in one transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use copperleaf_core::BannerId;

use super::RepositoryError;
use crate::models::banner::{Banner, BannerChanges, NewBanner};

#[derive(Debug, sqlx::FromRow)]
struct BannerRow {
    id: i32,
    title: String,
    image: String,
    link: Option<String>,
    sequence: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BannerRow> for Banner {
    fn from(row: BannerRow) -> Self {
        Self {
            id: BannerId::new(row.id),
            title: row.title,
            image: row.image,
            link: row.link,
            sequence: row.sequence,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT id, title, image, link, sequence, is_active, created_at, updated_at
    FROM banners
";

/// Repository for banner database operations.
pub struct BannerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BannerRepository<'a> {
    /// Create a new banner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all banners in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Banner>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY sequence, id");
        let rows: Vec<BannerRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a banner by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner does not exist.
    pub async fn get_by_id(&self, id: BannerId) -> Result<Banner, RepositoryError> {
        let sql = format!("{SELECT} WHERE id = $1");
        let row: Option<BannerRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a banner at the end of the current ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: NewBanner) -> Result<Banner, RepositoryError> {
        let id: (i32,) = sqlx::query_as(
            "INSERT INTO banners (title, image, link, is_active, sequence)
             VALUES ($1, $2, $3, $4, (SELECT COALESCE(MAX(sequence) + 1, 0) FROM banners))
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.image)
        .bind(&input.link)
        .bind(input.is_active)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(BannerId::new(id.0)).await
    }

    /// Apply a partial update (content fields only; ordering goes through
    /// [`Self::reorder`]).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner does not exist.
    pub async fn update(
        &self,
        id: BannerId,
        changes: BannerChanges,
    ) -> Result<Banner, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let title = changes.title.unwrap_or(current.title);
        let image = changes.image.unwrap_or(current.image);
        let link = changes.link.or(current.link);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE banners
             SET title = $2, image = $3, link = $4, is_active = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&title)
        .bind(&image)
        .bind(&link)
        .bind(is_active)
        .execute(self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the banner does not exist.
    pub async fn delete(&self, id: BannerId) -> Result<(), RepositoryError> {
        let deleted = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Persist a drag-reorder: `ids` is the full banner list in its new
    /// display order, and each banner's sequence becomes its array index.
    /// Runs in one transaction; an unknown id rolls the whole reorder back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any id does not exist.
    pub async fn reorder(&self, ids: &[BannerId]) -> Result<Vec<Banner>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ids.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            // Banner counts are far below i32::MAX
            let sequence = index as i32;
            let updated = sqlx::query(
                "UPDATE banners SET sequence = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(id.as_i32())
            .bind(sequence)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if updated == 0 {
                // Dropping the transaction rolls back prior updates.
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await?;
        self.list().await
    }
}
