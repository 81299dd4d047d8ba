//! Menu route handlers.
//!
//! Menus are looked up by id only; they carry no slug.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use copperleaf_core::MenuId;
use copperleaf_core::tree::{self, TreeNode};

use super::{DataResponse, ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::MenuRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Menu;
use crate::models::menu::{MenuChanges, NewMenu};
use crate::state::AppState;

/// Build the menus router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menus", get(list).post(create))
        .route("/api/menus/{id}", get(show).put(update).delete(remove))
}

/// A menu entry with its direct children attached.
#[derive(Debug, Serialize)]
pub struct MenuTree {
    #[serde(flatten)]
    pub menu: Menu,
    pub children: Vec<Menu>,
}

impl From<TreeNode<Menu>> for MenuTree {
    fn from(node: TreeNode<Menu>) -> Self {
        Self {
            menu: node.record,
            children: node.children,
        }
    }
}

/// List all menus as a two-level tree, ordered by sequence.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<MenuTree>>> {
    let menus = MenuRepository::new(state.pool()).list().await?;
    let total = menus.len();
    let data = tree::assemble(menus).into_iter().map(Into::into).collect();
    Ok(Json(ListResponse::new(total, data)))
}

/// Get a single menu entry by id.
///
/// # Errors
///
/// Returns 404 if the menu does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DataResponse<Menu>>> {
    let menu = MenuRepository::new(state.pool())
        .get_by_id(MenuId::new(id))
        .await?;
    Ok(Json(DataResponse::new(menu)))
}

/// Create a menu entry.
///
/// # Errors
///
/// Returns 400 on a blank title or link, or a missing or nested parent.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewMenu>,
) -> Result<(StatusCode, Json<MutationResponse<Menu>>)> {
    require_field(&input.title, "title")?;
    require_field(&input.link, "link")?;
    let menu = MenuRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Menu created", menu)),
    ))
}

/// Apply a partial update to a menu entry.
///
/// # Errors
///
/// Returns 404 if the menu does not exist, plus the same validation
/// errors as [`create`].
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<MenuChanges>,
) -> Result<Json<MutationResponse<Menu>>> {
    if let Some(title) = &changes.title {
        require_field(title, "title")?;
    }
    if let Some(link) = &changes.link {
        require_field(link, "link")?;
    }
    let menu = MenuRepository::new(state.pool())
        .update(MenuId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Menu updated", menu)))
}

/// Delete a menu entry and its direct children.
///
/// # Errors
///
/// Returns 404 if the menu does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let removed = MenuRepository::new(state.pool())
        .delete(MenuId::new(id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Deleted {removed} menu(s)"
    ))))
}
