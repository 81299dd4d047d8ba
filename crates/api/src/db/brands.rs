//! Brand repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use copperleaf_core::BrandId;
use copperleaf_core::slug::derive_slug;

use super::hierarchy::HierarchyTable;
use super::{RepositoryError, map_unique_violation};
use crate::models::ParentSummary;
use crate::models::brand::{Brand, BrandChanges, NewBrand};

const TABLE: HierarchyTable = HierarchyTable {
    table: "brands",
    kind: "brand",
};

/// Internal row type for brand queries, parent pre-joined.
#[derive(Debug, sqlx::FromRow)]
struct BrandRow {
    id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    logo: Option<String>,
    is_active: bool,
    parent_id: Option<i32>,
    parent_name: Option<String>,
    parent_slug: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BrandRow> for Brand {
    fn from(row: BrandRow) -> Self {
        let parent = match (row.parent_id, row.parent_name) {
            (Some(id), Some(name)) => Some(ParentSummary {
                id: BrandId::new(id),
                name,
                slug: row.parent_slug,
            }),
            _ => None,
        };

        Self {
            id: BrandId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            logo: row.logo,
            is_active: row.is_active,
            parent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT b.id, b.name, b.slug, b.description, b.logo, b.is_active,
           b.parent_id, p.name AS parent_name, p.slug AS parent_slug,
           b.created_at, b.updated_at
    FROM brands b
    LEFT JOIN brands p ON p.id = b.parent_id
";

/// Repository for brand database operations.
pub struct BrandRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BrandRepository<'a> {
    /// Create a new brand repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all brands sorted by name, children included in the flat list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Brand>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY b.name");
        let rows: Vec<BrandRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a brand by numeric id or, failing that, by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no brand matches.
    pub async fn get(&self, selector: &str) -> Result<Brand, RepositoryError> {
        if let Ok(id) = selector.parse::<i32>() {
            return self.get_by_id(BrandId::new(id)).await;
        }

        let sql = format!("{SELECT} WHERE b.slug = $1");
        let row: Option<BrandRow> = sqlx::query_as(&sql)
            .bind(selector)
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Get a brand by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the brand does not exist.
    pub async fn get_by_id(&self, id: BrandId) -> Result<Brand, RepositoryError> {
        let sql = format!("{SELECT} WHERE b.id = $1");
        let row: Option<BrandRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a brand. Derives the slug and validates the parent reference.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParent` if the parent is missing or nested,
    /// `Slug` if the name yields no usable slug, and `Conflict` on
    /// name/slug uniqueness violations.
    pub async fn create(&self, input: NewBrand) -> Result<Brand, RepositoryError> {
        if let Some(parent) = input.parent {
            TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
        }

        let slugs = TABLE.existing_slugs(self.pool, None).await?;
        let slug = derive_slug(&input.name, |s| slugs.contains(s))?;

        let id: (i32,) = sqlx::query_as(
            "INSERT INTO brands (name, slug, description, logo, is_active, parent_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&slug)
        .bind(&input.description)
        .bind(&input.logo)
        .bind(input.is_active)
        .bind(input.parent.map(|p| p.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("name", &input.name), ("slug", &slug)]))?;

        self.get_by_id(BrandId::new(id.0)).await
    }

    /// Apply a partial update. Renaming recomputes the slug against the
    /// other rows' slugs; `parent` is three-state (absent/null/id).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the brand does not exist, plus the same
    /// validation errors as [`Self::create`].
    pub async fn update(&self, id: BrandId, changes: BrandChanges) -> Result<Brand, RepositoryError> {
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
                        "brand {id} cannot be its own parent"
                    )));
                }
                TABLE.ensure_no_children(self.pool, id.as_i32()).await?;
                TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
                Some(parent)
            }
        };

        let description = changes.description.or(current.description);
        let logo = changes.logo.or(current.logo);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE brands
             SET name = $2, slug = $3, description = $4, logo = $5,
                 is_active = $6, parent_id = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&name)
        .bind(&slug)
        .bind(&description)
        .bind(&logo)
        .bind(is_active)
        .bind(parent_id.map(|p| p.as_i32()))
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("name", &name), ("slug", &slug)]))?;

        self.get_by_id(id).await
    }

    /// Delete a brand and its direct sub-brands in one transaction.
    ///
    /// Returns the number of rows removed (sub-brands + 1).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the brand does not exist.
    pub async fn delete(&self, id: BrandId) -> Result<u64, RepositoryError> {
        TABLE.delete_cascade(self.pool, id.as_i32()).await
    }
}
