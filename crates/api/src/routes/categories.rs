//! Category route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use copperleaf_core::CategoryId;
use copperleaf_core::tree::{self, TreeNode};

use super::{DataResponse, ListResponse, MessageResponse, MutationResponse, require_field};
use crate::db::CategoryRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Category;
use crate::models::category::{CategoryChanges, NewCategory};
use crate::state::AppState;

/// Build the categories router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list).post(create))
        .route(
            "/api/categories/{selector}",
            get(show).put(update).delete(remove),
        )
}

/// A category with its direct children attached.
#[derive(Debug, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

impl From<TreeNode<Category>> for CategoryTree {
    fn from(node: TreeNode<Category>) -> Self {
        Self {
            category: node.record,
            children: node.children,
        }
    }
}

/// List all categories as a two-level tree.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<CategoryTree>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    let total = categories.len();
    let data = tree::assemble(categories)
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(ListResponse::new(total, data)))
}

/// Get a single category by numeric id or slug.
///
/// # Errors
///
/// Returns 404 if no category matches.
pub async fn show(
    State(state): State<AppState>,
    Path(selector): Path<String>,
) -> Result<Json<DataResponse<Category>>> {
    let category = CategoryRepository::new(state.pool()).get(&selector).await?;
    Ok(Json(DataResponse::new(category)))
}

/// Create a category.
///
/// # Errors
///
/// Returns 400 on a blank name, a missing or nested parent, or a slug
/// conflict.
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> Result<(StatusCode, Json<MutationResponse<Category>>)> {
    require_field(&input.name, "name")?;
    let category = CategoryRepository::new(state.pool()).create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Category created", category)),
    ))
}

/// Apply a partial update to a category.
///
/// # Errors
///
/// Returns 404 if the category does not exist, plus the same validation
/// errors as [`create`].
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(changes): Json<CategoryChanges>,
) -> Result<Json<MutationResponse<Category>>> {
    if let Some(name) = &changes.name {
        require_field(name, "name")?;
    }
    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), changes)
        .await?;
    Ok(Json(MutationResponse::new("Category updated", category)))
}

/// Delete a category and its direct children.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
pub async fn remove(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>> {
    let removed = CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Deleted {removed} category(ies)"
    ))))
}
