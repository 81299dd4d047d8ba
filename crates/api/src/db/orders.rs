//! Order repository.
//!
//! Orders are inserted by the checkout flow (and the seed command); the API
//! reads them and moves them through the status lifecycle.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use copperleaf_core::OrderId;

use super::RepositoryError;
use crate::models::order::{Order, OrderItem, OrderStatus};

/// Internal row type for order queries. Status and items are stored as
/// TEXT/JSONB and validated on the way out.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    customer_name: String,
    customer_email: String,
    status: String,
    total: Decimal,
    items: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::from_str(&row.status)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))?;

        let items: Vec<OrderItem> = serde_json::from_value(row.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid order items: {e}")))?;

        Ok(Self {
            id: OrderId::new(row.id),
            order_number: row.order_number,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            status,
            total: row.total,
            items,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT: &str = "
    SELECT id, order_number, customer_name, customer_email, status, total,
           items, created_at, updated_at
    FROM orders
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `DataCorruption` if a stored status or item snapshot is invalid.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY created_at DESC");
        let rows: Vec<OrderRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Order, RepositoryError> {
        let sql = format!("{SELECT} WHERE id = $1");
        let row: Option<OrderRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    /// Move an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let updated = sqlx::query(
            "UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(status.to_string())
        .execute(self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await
    }
}
