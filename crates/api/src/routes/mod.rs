//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Brands
//! GET    /api/brands               - Tree-assembled brand listing
//! GET    /api/brands/{selector}    - Single brand by id or slug
//! POST   /api/brands               - Create brand (admin)
//! PUT    /api/brands/{id}          - Update brand (admin)
//! DELETE /api/brands/{id}          - Delete brand + direct children (admin)
//!
//! # Categories (same shape as brands)
//! GET    /api/categories
//! GET    /api/categories/{selector}
//! POST   /api/categories
//! PUT    /api/categories/{id}
//! DELETE /api/categories/{id}
//!
//! # Menus (ordered by sequence, no slug)
//! GET    /api/menus
//! GET    /api/menus/{id}
//! POST   /api/menus
//! PUT    /api/menus/{id}
//! DELETE /api/menus/{id}
//!
//! # Products
//! GET    /api/products?category=&brand=
//! GET    /api/products/{selector}
//! POST   /api/products
//! PUT    /api/products/{id}
//! DELETE /api/products/{id}
//!
//! # Orders (admin-side management; checkout is out of scope)
//! GET    /api/orders
//! GET    /api/orders/{id}
//! PUT    /api/orders/{id}/status
//!
//! # Banners
//! GET    /api/banners
//! POST   /api/banners
//! PUT    /api/banners/reorder      - Persist drag-reorder (admin)
//! PUT    /api/banners/{id}
//! DELETE /api/banners/{id}
//!
//! # Social links
//! GET    /api/social-links
//! POST   /api/social-links
//! PUT    /api/social-links/{id}
//! DELETE /api/social-links/{id}
//! ```
//!
//! Reads are public (the storefront consumes them); all mutations require
//! the admin bearer token via [`crate::middleware::RequireAdmin`].

use axum::Router;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

pub mod banners;
pub mod brands;
pub mod categories;
pub mod menus;
pub mod orders;
pub mod products;
pub mod social_links;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(brands::router())
        .merge(categories::router())
        .merge(menus::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(banners::router())
        .merge(social_links::router())
}

/// Envelope for single-resource reads: `{success, data}`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope for listings: `{success, total, data}`. `total` counts the
/// underlying rows, not the assembled roots.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub total: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub const fn new(total: usize, data: Vec<T>) -> Self {
        Self {
            success: true,
            total,
            data,
        }
    }
}

/// Envelope for create/update: `{success, message, data}`.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T> {
    pub success: bool,
    pub message: &'static str,
    pub data: T,
}

impl<T> MutationResponse<T> {
    pub const fn new(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message,
            data,
        }
    }
}

/// Envelope for deletes: `{success, message}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub const fn new(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Reject blank required string fields before they reach the database.
pub(crate) fn require_field(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_response_shape() {
        let json = serde_json::to_value(DataResponse::new("x")).expect("serialize");
        assert_eq!(json, serde_json::json!({"success": true, "data": "x"}));
    }

    #[test]
    fn test_list_response_shape() {
        let json = serde_json::to_value(ListResponse::new(2, vec![1, 2])).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": true, "total": 2, "data": [1, 2]})
        );
    }

    #[test]
    fn test_mutation_response_shape() {
        let json = serde_json::to_value(MutationResponse::new("Created", 7)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Created", "data": 7})
        );
    }

    #[test]
    fn test_require_field_rejects_blank() {
        assert!(require_field("", "name").is_err());
        assert!(require_field("   ", "name").is_err());
        assert!(require_field("Nike", "name").is_ok());
    }
}
