//! Category domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::CategoryId;
use copperleaf_core::tree::TreeRecord;

use super::{ParentSummary, double_option};

/// A product category, optionally nested one level under a parent category.
///
/// Unlike brands, category names may repeat; only the slug is unique.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub parent: Option<ParentSummary<CategoryId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn parent_id(&self) -> Option<CategoryId> {
        self.parent.as_ref().map(|p| p.id)
    }
}

/// Fields accepted when creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub parent: Option<CategoryId>,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent: Option<Option<CategoryId>>,
}
