//! Social link domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::SocialLinkId;

/// A footer/profile social link. `platform` is unique.
#[derive(Debug, Clone, Serialize)]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a social link.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// Partial update for a social link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialLinkChanges {
    pub platform: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
}
