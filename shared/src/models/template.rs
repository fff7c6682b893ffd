//! Reusable order template models
//!
//! Templates are quantity-only reuse patterns: they store no prices, so
//! loading one into the order form always picks up current default prices.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A saved, reusable list of (ingredient, quantity) pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One (ingredient, quantity) entry of a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub id: i64,
    pub template_id: i64,
    pub ingredient_id: i64,
    pub quantity: Decimal,
}

/// A template with its items, as served to the order form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWithItems {
    #[serde(flatten)]
    pub template: OrderTemplate,
    pub items: Vec<TemplateItem>,
}

/// One submitted template line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItemInput {
    pub ingredient_id: i64,
    pub quantity: Decimal,
}

/// Input for creating a template atomically with its items
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateInput {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<TemplateItemInput>,
}
