//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use copperleaf_core::{BrandId, CategoryId, ProductId};

use super::{ParentSummary, double_option};

/// A catalog product. Flat (no hierarchy of its own); references an
/// optional brand and category.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub images: Vec<String>,
    pub is_active: bool,
    pub brand: Option<ParentSummary<BrandId>>,
    pub category: Option<ParentSummary<CategoryId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub brand: Option<BrandId>,
    #[serde(default)]
    pub category: Option<CategoryId>,
}

/// Partial update for a product. `brand` and `category` distinguish absent
/// (unchanged) from explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub brand: Option<Option<BrandId>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category: Option<Option<CategoryId>>,
}

/// Filters for product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Restrict to products in the category with this slug.
    pub category: Option<String>,
    /// Restrict to products of the brand with this slug.
    pub brand: Option<String>,
}
