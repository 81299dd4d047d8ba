//! Product repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use copperleaf_core::{BrandId, CategoryId, ProductId};
use copperleaf_core::slug::derive_slug;

use super::{RepositoryError, map_unique_violation};
use crate::models::ParentSummary;
use crate::models::product::{NewProduct, Product, ProductChanges, ProductFilter};

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    slug: String,
    description: Option<String>,
    price: Decimal,
    images: Vec<String>,
    is_active: bool,
    brand_id: Option<i32>,
    brand_name: Option<String>,
    brand_slug: Option<String>,
    category_id: Option<i32>,
    category_name: Option<String>,
    category_slug: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let brand = match (row.brand_id, row.brand_name) {
            (Some(id), Some(name)) => Some(ParentSummary {
                id: BrandId::new(id),
                name,
                slug: row.brand_slug,
            }),
            _ => None,
        };
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(ParentSummary {
                id: CategoryId::new(id),
                name,
                slug: row.category_slug,
            }),
            _ => None,
        };

        Self {
            id: ProductId::new(row.id),
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            images: row.images,
            is_active: row.is_active,
            brand,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT pr.id, pr.name, pr.slug, pr.description, pr.price, pr.images, pr.is_active,
           pr.brand_id, b.name AS brand_name, b.slug AS brand_slug,
           pr.category_id, c.name AS category_name, c.slug AS category_slug,
           pr.created_at, pr.updated_at
    FROM products pr
    LEFT JOIN brands b ON b.id = pr.brand_id
    LEFT JOIN categories c ON c.id = pr.category_id
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products sorted by name, optionally filtered by brand and/or
    /// category slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = match (&filter.category, &filter.brand) {
            (None, None) => {
                let sql = format!("{SELECT} ORDER BY pr.name");
                sqlx::query_as(&sql).fetch_all(self.pool).await?
            }
            (Some(category), None) => {
                let sql = format!("{SELECT} WHERE c.slug = $1 ORDER BY pr.name");
                sqlx::query_as(&sql).bind(category).fetch_all(self.pool).await?
            }
            (None, Some(brand)) => {
                let sql = format!("{SELECT} WHERE b.slug = $1 ORDER BY pr.name");
                sqlx::query_as(&sql).bind(brand).fetch_all(self.pool).await?
            }
            (Some(category), Some(brand)) => {
                let sql = format!("{SELECT} WHERE c.slug = $1 AND b.slug = $2 ORDER BY pr.name");
                sqlx::query_as(&sql)
                    .bind(category)
                    .bind(brand)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product by numeric id or, failing that, by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product matches.
    pub async fn get(&self, selector: &str) -> Result<Product, RepositoryError> {
        if let Ok(id) = selector.parse::<i32>() {
            return self.get_by_id(ProductId::new(id)).await;
        }

        let sql = format!("{SELECT} WHERE pr.slug = $1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(selector)
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let sql = format!("{SELECT} WHERE pr.id = $1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a product. Derives the slug and validates brand/category
    /// references.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParent` for dangling references, `Slug` if the name
    /// yields no usable slug, and `Conflict` on slug collision.
    pub async fn create(&self, input: NewProduct) -> Result<Product, RepositoryError> {
        if let Some(brand) = input.brand {
            ensure_exists(self.pool, "brands", "brand", brand.as_i32()).await?;
        }
        if let Some(category) = input.category {
            ensure_exists(self.pool, "categories", "category", category.as_i32()).await?;
        }

        let slugs = self.existing_slugs(None).await?;
        let slug = derive_slug(&input.name, |s| slugs.contains(s))?;

        let id: (i32,) = sqlx::query_as(
            "INSERT INTO products (name, slug, description, price, images, is_active, brand_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.images)
        .bind(input.is_active)
        .bind(input.brand.map(|b| b.as_i32()))
        .bind(input.category.map(|c| c.as_i32()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("slug", &slug)]))?;

        self.get_by_id(ProductId::new(id.0)).await
    }

    /// Apply a partial update; renaming recomputes the slug.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist, plus the same
    /// validation errors as [`Self::create`].
    pub async fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let name_changed = changes.name.as_ref().is_some_and(|n| *n != current.name);
        let name = changes.name.unwrap_or(current.name);
        let slug = if name_changed {
            let slugs = self.existing_slugs(Some(id.as_i32())).await?;
            derive_slug(&name, |s| slugs.contains(s))?
        } else {
            current.slug
        };

        let brand_id = match changes.brand {
            None => current.brand.as_ref().map(|b| b.id),
            Some(None) => None,
            Some(Some(brand)) => {
                ensure_exists(self.pool, "brands", "brand", brand.as_i32()).await?;
                Some(brand)
            }
        };
        let category_id = match changes.category {
            None => current.category.as_ref().map(|c| c.id),
            Some(None) => None,
            Some(Some(category)) => {
                ensure_exists(self.pool, "categories", "category", category.as_i32()).await?;
                Some(category)
            }
        };

        let description = changes.description.or(current.description);
        let price = changes.price.unwrap_or(current.price);
        let images = changes.images.unwrap_or(current.images);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE products
             SET name = $2, slug = $3, description = $4, price = $5, images = $6,
                 is_active = $7, brand_id = $8, category_id = $9, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&name)
        .bind(&slug)
        .bind(&description)
        .bind(price)
        .bind(&images)
        .bind(is_active)
        .bind(brand_id.map(|b| b.as_i32()))
        .bind(category_id.map(|c| c.as_i32()))
        .execute(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &[("slug", &slug)]))?;

        self.get_by_id(id).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn existing_slugs(
        &self,
        exclude: Option<i32>,
    ) -> Result<std::collections::HashSet<String>, RepositoryError> {
        let rows: Vec<(String,)> = if let Some(id) = exclude {
            sqlx::query_as("SELECT slug FROM products WHERE id <> $1")
                .bind(id)
                .fetch_all(self.pool)
                .await?
        } else {
            sqlx::query_as("SELECT slug FROM products")
                .fetch_all(self.pool)
                .await?
        };
        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }
}

/// Validate that a referenced row exists.
async fn ensure_exists(
    pool: &PgPool,
    table: &str,
    kind: &str,
    id: i32,
) -> Result<(), RepositoryError> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = $1");
    let row: Option<(i32,)> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
    if row.is_none() {
        return Err(RepositoryError::InvalidParent(format!(
            "{kind} {id} not found"
        )));
    }
    Ok(())
}
