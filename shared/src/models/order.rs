//! Purchase order models and the status state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A purchase order with its persisted total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub notes: Option<String>,
    /// Sum of the line item totals, fixed at creation time
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A line item within an order. Immutable once the order exists; the unit
/// price is a snapshot of what was paid, independent of the ingredient's
/// current default price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub ingredient_id: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// quantity * unit_price, computed once at creation and stored
    pub total_price: Decimal,
}

/// Order status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Submitted,
    Received,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Received => "received",
        }
    }

    /// Transition table: draft -> submitted -> received, with an explicit
    /// undo path from received back to submitted. Everything else is
    /// rejected at the service boundary.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Draft, OrderStatus::Submitted)
                | (OrderStatus::Submitted, OrderStatus::Received)
                | (OrderStatus::Received, OrderStatus::Submitted)
        )
    }
}

/// Error for status values outside the lifecycle
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(OrderStatus::Draft),
            "submitted" => Ok(OrderStatus::Submitted),
            "received" => Ok(OrderStatus::Received),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One submitted order line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub ingredient_id: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Input for creating an order atomically with its items
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderInput {
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub items: Vec<OrderItemInput>,
}
