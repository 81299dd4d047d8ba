//! Menu domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use copperleaf_core::MenuId;
use copperleaf_core::tree::TreeRecord;

use super::{ParentSummary, double_option};

/// A navigation menu entry. Menus carry no slug and are ordered by an
/// explicit `sequence` rather than by title.
#[derive(Debug, Clone, Serialize)]
pub struct Menu {
    pub id: MenuId,
    pub title: String,
    pub link: String,
    pub icon: Option<String>,
    pub sequence: i32,
    pub is_active: bool,
    pub parent: Option<ParentSummary<MenuId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TreeRecord for Menu {
    type Id = MenuId;

    fn id(&self) -> MenuId {
        self.id
    }

    fn parent_id(&self) -> Option<MenuId> {
        self.parent.as_ref().map(|p| p.id)
    }
}

/// Fields accepted when creating a menu entry.
///
/// `sequence` defaults to the end of the current ordering when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMenu {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sequence: Option<i32>,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub parent: Option<MenuId>,
}

/// Partial update for a menu entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuChanges {
    pub title: Option<String>,
    pub link: Option<String>,
    pub icon: Option<String>,
    pub sequence: Option<i32>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent: Option<Option<MenuId>>,
}
