//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};

use copperleaf_core::ProductId;

use super::{DataResponse, ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::models::product::{NewProduct, ProductChanges, ProductFilter};
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route(
            "/api/products/{selector}",
            get(show).put(update).delete(remove),
        )
}

/// List products, optionally filtered by `?category=` and/or `?brand=` slug.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<ListResponse<Product>>> {
    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    let total = products.len();
    Ok(Json(ListResponse::new(total, products)))
}

/// Get a single product by numeric id or slug.
///
/// # Errors
///
/// Returns 404 if no product matches.
pub async fn show(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> Result<Json<DataResponse<Product>>> {
    let product = ProductRepository::new(state.pool()).get(&selector).await?;
    Ok(Json(DataResponse::new(product)))
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 on a blank name, a dangling brand/category reference, or
/// a slug conflict.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<MutationResponse<Product>>)> {
    require_field(&input.name, "name")?;
    let product = ProductRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Product created", product)),
    ))
}

/// Apply a partial update to a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist, plus the same validation
/// errors as [`create`].
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<ProductChanges>,
) -> Result<Json<MutationResponse<Product>>> {
    if let Some(name) = &changes.name {
        require_field(name, "name")?;
    }
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Product updated", product)))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("Product deleted".to_string())))
}
