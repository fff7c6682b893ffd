//! Purchase order service
//!
//! Orders are created atomically with all their line items; items are
//! immutable afterwards and the only post-creation mutation is the status
//! field, guarded by the transition table on `OrderStatus`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::str::FromStr;

use shared::models::{CreateOrderInput, Order, OrderItem, OrderStatus};
use shared::validation::{order_total, validate_order_item};

use crate::error::{AppError, AppResult};
use crate::views::{StaleView, ViewCache};

/// Order service for creation, status transitions, and deletion
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
    views: ViewCache,
}

/// An order line annotated with ingredient display fields
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub ingredient_name: String,
    pub ingredient_unit: String,
}

/// An order with its line items, as served on the detail view
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

type OrderRow = (i64, String, DateTime<Utc>, Option<String>, Decimal, DateTime<Utc>);

fn order_from_row(row: OrderRow) -> AppResult<Order> {
    let status =
        OrderStatus::from_str(&row.1).map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
    Ok(Order {
        id: row.0,
        status,
        order_date: row.2,
        notes: row.3,
        total_amount: row.4,
        created_at: row.5,
    })
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool, views: ViewCache) -> Self {
        Self { db, views }
    }

    /// List all orders, newest first
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, status, order_date, notes, total_amount, created_at
            FROM orders
            ORDER BY order_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(order_from_row).collect()
    }

    /// Get an order with its items for the detail view
    pub async fn get(&self, order_id: i64) -> AppResult<OrderWithItems> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, status, order_date, notes, total_amount, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let order = order_from_row(row)?;

        let items = sqlx::query_as::<_, (i64, i64, i64, Decimal, Decimal, Decimal, String, String)>(
            r#"
            SELECT oi.id, oi.order_id, oi.ingredient_id, oi.quantity, oi.unit_price,
                   oi.total_price, i.name, i.unit
            FROM order_items oi
            JOIN ingredients i ON i.id = oi.ingredient_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?
        .into_iter()
        .map(|r| OrderItemDetail {
            item: OrderItem {
                id: r.0,
                order_id: r.1,
                ingredient_id: r.2,
                quantity: r.3,
                unit_price: r.4,
                total_price: r.5,
            },
            ingredient_name: r.6,
            ingredient_unit: r.7,
        })
        .collect();

        Ok(OrderWithItems { order, items })
    }

    /// Create an order and all of its items in one transaction.
    ///
    /// Submitted line totals are recomputed from quantity * unit price and
    /// the request is rejected if they disagree; the persisted total amount
    /// is always the server-side sum.
    pub async fn create(&self, input: CreateOrderInput) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::ValidationError(
                "Order must have at least one item".to_string(),
            ));
        }

        // The form only submits new orders as draft or submitted
        if input.status == OrderStatus::Received {
            return Err(AppError::ValidationError(
                "New orders must be created as draft or submitted".to_string(),
            ));
        }

        for item in &input.items {
            validate_order_item(item).map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        }

        let total_amount = order_total(&input.items);
        let notes = input.notes.filter(|n| !n.trim().is_empty());

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (status, notes, total_amount)
            VALUES ($1, $2, $3)
            RETURNING id, status, order_date, notes, total_amount, created_at
            "#,
        )
        .bind(input.status.as_str())
        .bind(&notes)
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let order = order_from_row(row)?;

        for item in &input.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, ingredient_id, quantity, unit_price, total_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id)
            .bind(item.ingredient_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.total_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.views
            .invalidate(&[StaleView::Orders, StaleView::Dashboard]);
        Ok(order)
    }

    /// Move an order to a new status, enforcing the transition table
    pub async fn update_status(&self, order_id: i64, new_status: OrderStatus) -> AppResult<Order> {
        let current: String = sqlx::query_scalar("SELECT status FROM orders WHERE id = $1")
            .bind(order_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let current = OrderStatus::from_str(&current)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;

        if !current.can_transition_to(new_status) {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot move order from {} to {}",
                current.as_str(),
                new_status.as_str()
            )));
        }

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders
            SET status = $1
            WHERE id = $2
            RETURNING id, status, order_date, notes, total_amount, created_at
            "#,
        )
        .bind(new_status.as_str())
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        self.views.invalidate(&[
            StaleView::Orders,
            StaleView::Order(order_id),
            StaleView::Dashboard,
        ]);
        order_from_row(row)
    }

    /// Delete an order; its items are removed with it
    pub async fn delete(&self, order_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order".to_string()));
        }

        self.views
            .invalidate(&[StaleView::Orders, StaleView::Dashboard]);
        Ok(())
    }
}
