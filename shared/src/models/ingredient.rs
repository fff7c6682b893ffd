//! Ingredient models and the fixed category set

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// An ingredient purchased from a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Unit of measure, free text (e.g. "lb", "case")
    pub unit: String,
    /// Current list price, pre-filled as the unit price on new order lines
    pub default_price: Decimal,
    pub category: IngredientCategory,
    pub supplier_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Ingredient annotated with its supplier's name for listing views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientWithSupplier {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    pub supplier_name: String,
}

/// Fixed category set used for display grouping of ingredients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    Produce,
    Meat,
    Dairy,
    #[serde(rename = "Dry Goods")]
    DryGoods,
    Seafood,
    Beverages,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 7] = [
        IngredientCategory::Produce,
        IngredientCategory::Meat,
        IngredientCategory::Dairy,
        IngredientCategory::DryGoods,
        IngredientCategory::Seafood,
        IngredientCategory::Beverages,
        IngredientCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Produce => "Produce",
            IngredientCategory::Meat => "Meat",
            IngredientCategory::Dairy => "Dairy",
            IngredientCategory::DryGoods => "Dry Goods",
            IngredientCategory::Seafood => "Seafood",
            IngredientCategory::Beverages => "Beverages",
            IngredientCategory::Other => "Other",
        }
    }
}

/// Error for values outside the fixed category set
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ingredient category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for IngredientCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Produce" => Ok(IngredientCategory::Produce),
            "Meat" => Ok(IngredientCategory::Meat),
            "Dairy" => Ok(IngredientCategory::Dairy),
            "Dry Goods" => Ok(IngredientCategory::DryGoods),
            "Seafood" => Ok(IngredientCategory::Seafood),
            "Beverages" => Ok(IngredientCategory::Beverages),
            "Other" => Ok(IngredientCategory::Other),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Input for creating or updating an ingredient. All fields are required;
/// the service rejects the call if any is missing or blank.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub unit: String,
    pub default_price: Decimal,
    pub category: IngredientCategory,
    pub supplier_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_display_name() {
        for category in IngredientCategory::ALL {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "Spices".parse::<IngredientCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("Spices".to_string()));
    }
}
