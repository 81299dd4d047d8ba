//! Domain models for the catalog API.

pub mod banner;
pub mod brand;
pub mod category;
pub mod menu;
pub mod order;
pub mod product;
pub mod social_link;

pub use banner::Banner;
pub use brand::Brand;
pub use category::Category;
pub use menu::Menu;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::Product;
pub use social_link::SocialLink;

use serde::{Deserialize, Deserializer, Serialize};

/// Expanded parent reference on a hierarchical entity.
///
/// Menus have no slug, so `slug` is optional and omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentSummary<Id> {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Serde default for `is_active`-style flags.
pub(crate) const fn default_true() -> bool {
    true
}

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` fields: `None` means the field was absent (leave
/// unchanged), `Some(None)` means it was `null` (clear), `Some(Some(v))`
/// means set to `v`.
///
/// # Errors
///
/// Propagates the inner deserialization error.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use copperleaf_core::BrandId;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        parent: Option<Option<BrandId>>,
    }

    #[test]
    fn test_double_option_absent() {
        let patch: Patch = serde_json::from_str("{}").expect("parse");
        assert_eq!(patch.parent, None);
    }

    #[test]
    fn test_double_option_null() {
        let patch: Patch = serde_json::from_str(r#"{"parent": null}"#).expect("parse");
        assert_eq!(patch.parent, Some(None));
    }

    #[test]
    fn test_double_option_value() {
        let patch: Patch = serde_json::from_str(r#"{"parent": 3}"#).expect("parse");
        assert_eq!(patch.parent, Some(Some(BrandId::new(3))));
    }
}
