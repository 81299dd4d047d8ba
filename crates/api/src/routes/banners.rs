//! Banner route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;

use copperleaf_core::BannerId;

use super::{ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::BannerRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::Banner;
use crate::models::banner::{BannerChanges, NewBanner};
use crate::state::AppState;

/// Build the banners router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/banners", get(list).post(create))
        // Static segment registered alongside `{id}`; axum prefers the
        // static match.
        .route("/api/banners/reorder", put(reorder))
        .route("/api/banners/{id}", put(update).delete(remove))
}

/// Request body for persisting a drag-reorder: the full banner id list in
/// its new display order.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<BannerId>,
}

/// List all banners in display order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<Banner>>> {
    let banners = BannerRepository::new(state.pool()).list().await?;
    let total = banners.len();
    Ok(Json(ListResponse::new(total, banners)))
}

/// Create a banner at the end of the current ordering.
///
/// # Errors
///
/// Returns 400 on a blank title or image.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewBanner>,
) -> Result<(StatusCode, Json<MutationResponse<Banner>>)> {
    require_field(&input.title, "title")?;
    require_field(&input.image, "image")?;
    let banner = BannerRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Banner created", banner)),
    ))
}

/// Apply a partial update to a banner.
///
/// # Errors
///
/// Returns 404 if the banner does not exist.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<BannerChanges>,
) -> Result<Json<MutationResponse<Banner>>> {
    if let Some(title) = &changes.title {
        require_field(title, "title")?;
    }
    let banner = BannerRepository::new(state.pool())
        .update(BannerId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Banner updated", banner)))
}

/// Delete a banner.
///
/// # Errors
///
/// Returns 404 if the banner does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    BannerRepository::new(state.pool())
        .delete(BannerId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("Banner deleted".to_string())))
}

/// Persist a drag-reorder of the banner list.
///
/// # Errors
///
/// Returns 400 on an empty id list and 404 if any id is unknown; in the
/// 404 case nothing is changed.
pub async fn reorder(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<ListResponse<Banner>>> {
    if body.ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".to_string()));
    }
    let banners = BannerRepository::new(state.pool())
        .reorder(&body.ids)
        .await?;
    let total = banners.len();
    Ok(Json(ListResponse::new(total, banners)))
}
