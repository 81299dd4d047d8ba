//! Social link route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use copperleaf_core::SocialLinkId;

use super::{ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::SocialLinkRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::SocialLink;
use crate::models::social_link::{NewSocialLink, SocialLinkChanges};
use crate::state::AppState;

/// Build the social links router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/social-links", get(list).post(create))
        .route("/api/social-links/{id}", axum::routing::put(update).delete(remove))
}

/// List all social links.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<SocialLink>>> {
    let links = SocialLinkRepository::new(state.pool()).list().await?;
    let total = links.len();
    Ok(Json(ListResponse::new(total, links)))
}

/// Create a social link.
///
/// # Errors
///
/// Returns 400 on a blank platform or url, or a duplicate platform.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewSocialLink>,
) -> Result<(StatusCode, Json<MutationResponse<SocialLink>>)> {
    require_field(&input.platform, "platform")?;
    require_field(&input.url, "url")?;
    let link = SocialLinkRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Social link created", link)),
    ))
}

/// Apply a partial update to a social link.
///
/// # Errors
///
/// Returns 404 if the link does not exist and 400 on a duplicate platform.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<SocialLinkChanges>,
) -> Result<Json<MutationResponse<SocialLink>>> {
    if let Some(platform) = &changes.platform {
        require_field(platform, "platform")?;
    }
    let link = SocialLinkRepository::new(state.pool())
        .update(SocialLinkId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Social link updated", link)))
}

/// Delete a social link.
///
/// # Errors
///
/// Returns 404 if the link does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    SocialLinkRepository::new(state.pool())
        .delete(SocialLinkId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("Social link deleted".to_string())))
}
