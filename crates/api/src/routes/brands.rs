//! Brand route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use copperleaf_core::BrandId;
use copperleaf_core::tree::{self, TreeNode};

use super::{DataResponse, ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::BrandRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Brand;
use crate::models::brand::{BrandChanges, NewBrand};
use crate::state::AppState;

/// Build the brands router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/brands", get(list).post(create))
        .route(
            "/api/brands/{selector}",
            get(show).put(update).delete(remove),
        )
}

/// A brand with its direct sub-brands attached.
#[derive(Debug, Serialize)]
pub struct BrandTree {
    #[serde(flatten)]
    pub brand: Brand,
    pub subbrands: Vec<Brand>,
}

impl From<TreeNode<Brand>> for BrandTree {
    fn from(node: TreeNode<Brand>) -> Self {
        Self {
            brand: node.record,
            subbrands: node.children,
        }
    }
}

/// List all brands as a two-level tree.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<BrandTree>>> {
    let brands = BrandRepository::new(state.pool()).list().await?;
    let total = brands.len();
    let data = tree::assemble(brands).into_iter().map(Into::into).collect();
    Ok(Json(ListResponse::new(total, data)))
}

/// Get a single brand by numeric id or slug.
///
/// # Errors
///
/// Returns 404 if no brand matches.
pub async fn show(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> Result<Json<DataResponse<Brand>>> {
    let brand = BrandRepository::new(state.pool()).get(&selector).await?;
    Ok(Json(DataResponse::new(brand)))
}

/// Create a brand.
///
/// # Errors
///
/// Returns 400 on a blank name, a missing or nested parent, or a
/// name/slug conflict.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewBrand>,
) -> Result<(StatusCode, Json<MutationResponse<Brand>>)> {
    require_field(&input.name, "name")?;
    let brand = BrandRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Brand created", brand)),
    ))
}

/// Apply a partial update to a brand.
///
/// # Errors
///
/// Returns 404 if the brand does not exist, plus the same validation
/// errors as [`create`].
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<BrandChanges>,
) -> Result<Json<MutationResponse<Brand>>> {
    if let Some(name) = &changes.name {
        require_field(name, "name")?;
    }
    let brand = BrandRepository::new(state.pool())
        .update(BrandId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Brand updated", brand)))
}

/// Delete a brand and its direct sub-brands.
///
/// # Errors
///
/// Returns 404 if the brand does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let removed = BrandRepository::new(state.pool())
        .delete(BrandId::new(id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Deleted {removed} brand(s)"
    ))))
}
