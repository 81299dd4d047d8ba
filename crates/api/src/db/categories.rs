//! Category repository.
//!
//! Same shape as the brand repository, with two differences: category names
//! are not unique (only the slug is), and the image column replaces logo.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use copperleaf_core::CategoryId;
use copperleaf_core::slug::derive_slug;

use super::hierarchy::HierarchyTable;
use super::{RepositoryError, map_unique_violation};
use crate::models::ParentSummary;
use crate::models::category::{Category, CategoryChanges, NewCategory};

const TABLE: HierarchyTable = HierarchyTable {
    table: "categories",
    kind: "category",
};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    image: Option<String>,
    is_active: bool,
    parent_id: Option<i32>,
    parent_name: Option<String>,
    parent_slug: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        let parent = match (row.parent_id, row.parent_name) {
            (Some(id), Some(name)) => Some(ParentSummary {
                id: CategoryId::new(id),
                name,
                slug: row.parent_slug,
            }),
            _ => None,
        };

        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            image: row.image,
            is_active: row.is_active,
            parent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT c.id, c.name, c.slug, c.description, c.image, c.is_active,
           c.parent_id, p.name AS parent_name, p.slug AS parent_slug,
           c.created_at, c.updated_at
    FROM categories c
    LEFT JOIN categories p ON p.id = c.parent_id
";

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY c.name");
        let rows: Vec<CategoryRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a category by numeric id or, failing that, by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no category matches.
    pub async fn get(&self, selector: &str) -> Result<Category, RepositoryError> {
        if let Ok(id) = selector.parse::<i32>() {
            return self.get_by_id(CategoryId::new(id)).await;
        }

        let sql = format!("{SELECT} WHERE c.slug = $1");
        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(selector)
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Get a category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Category, RepositoryError> {
        let sql = format!("{SELECT} WHERE c.id = $1");
        let row: Option<CategoryRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a category. Derives the slug and validates the parent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParent`, `Slug`, or `Conflict` on slug collision.
    pub async fn create(&self, input: NewCategory) -> Result<Category, RepositoryError> {
        if let Some(parent) = input.parent {
            TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
        }

        let slugs = TABLE.existing_slugs(self.pool, None).await?;
        let slug = derive_slug(&input.name, |s| slugs.contains(s))?;

        let id: (i32,) = sqlx::query_as(
            "INSERT INTO categories (name, slug, description, image, is_active, parent_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.is_active)
        .bind(input.parent.map(|p| p.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("slug", &slug)]))?;

        self.get_by_id(CategoryId::new(id.0)).await
    }

    /// Apply a partial update; renaming recomputes the slug.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, plus the same
    /// validation errors as [`Self::create`].
    pub async fn update(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<Category, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let name_changed = changes.name.as_ref().is_some_and(|n| *n != current.name);
        let name = changes.name.unwrap_or(current.name);
        let slug = if name_changed {
            let slugs = TABLE.existing_slugs(self.pool, Some(id.as_i32())).await?;
            derive_slug(&name, |s| slugs.contains(s))?
        } else {
            current.slug
        };

        let parent_id = match changes.parent {
            None => current.parent.as_ref().map(|p| p.id),
            Some(None) => None,
            Some(Some(parent)) => {
                if parent == id {
                    return Err(RepositoryError::InvalidParent(format!(
                        "category {id} cannot be its own parent"
                    )));
                }
                TABLE.ensure_no_children(self.pool, id.as_i32()).await?;
                TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
                Some(parent)
            }
        };

        let description = changes.description.or(current.description);
        let image = changes.image.or(current.image);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE categories
             SET name = $2, slug = $3, description = $4, image = $5,
                 is_active = $6, parent_id = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&name)
        .bind(&slug)
        .bind(&description)
        .bind(&image)
        .bind(is_active)
        .bind(parent_id.map(|p| p.as_i32()))
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("slug", &slug)]))?;

        self.get_by_id(id).await
    }

    /// Delete a category and its direct children in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    pub async fn delete(&self, id: CategoryId) -> Result<u64, RepositoryError> {
        TABLE.delete_cascade(self.pool, id.as_i32()).await
    }
}
