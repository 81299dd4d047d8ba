//! Order route handlers.
//!
//! Read-and-manage only: orders enter the system through the checkout
//! flow, which lives outside this service.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;

use copperleaf_core::OrderId;

use super::{DataResponse, ListResponse, MutationResponse};
use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Order;
use crate::models::order::OrderStatus;
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list))
        .route("/api/orders/{id}", get(show))
        .route("/api/orders/{id}/status", put(update_status))
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// List all orders, newest first. Admin only.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    let total = orders.len();
    Ok(Json(ListResponse::new(total, orders)))
}

/// Get a single order by id. Admin only.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
pub async fn show(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DataResponse<Order>>> {
    let order = OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?;
    Ok(Json(DataResponse::new(order)))
}

/// Move an order to a new status. Admin only.
///
/// # Errors
///
/// Returns 404 if the order does not exist; an unknown status fails JSON
/// deserialization with 400 before reaching the handler.
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<MutationResponse<Order>>> {
    let order = OrderRepository::new(state.pool())
        .update_status(OrderId::new(id), body.status)
        .await?;
    Ok(Json(MutationResponse::new("Order status updated", order)))
}
