//! Brand domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::BrandId;
use copperleaf_core::tree::TreeRecord;

use super::{ParentSummary, double_option};

/// A brand, optionally nested one level under a parent brand.
#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    /// Unique brand ID.
    pub id: BrandId,
    /// Display name, unique across all brands.
    pub name: String,
    /// URL-safe unique identifier derived from the name.
    pub slug: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub is_active: bool,
    /// Parent brand, expanded for API responses. `None` for root brands.
    pub parent: Option<ParentSummary<BrandId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord for Brand {
    type Id = BrandId;

    fn id(&self) -> BrandId {
        self.id
    }

    fn parent_id(&self) -> Option<BrandId> {
        self.parent.as_ref().map(|p| p.id)
    }
}

/// Fields accepted when creating a brand.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBrand {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub parent: Option<BrandId>,
}

/// Partial update for a brand. Absent fields are left unchanged; `parent`
/// distinguishes absent (unchanged) from explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent: Option<Option<BrandId>>,
}
