//! Banner domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::BannerId;

/// A homepage carousel banner, ordered by `sequence`.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub id: BannerId,
    pub title: String,
    pub image: String,
    pub link: Option<String>,
    pub sequence: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a banner. New banners append to the end
/// of the current ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBanner {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// Partial update for a banner. Reordering goes through the dedicated
/// reorder endpoint, not through `sequence` here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerChanges {
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub is_active: Option<bool>,
}
