//! Interactive order and template form state
//!
//! The browser holds one of these while the user fills in quantities; the
//! running total it computes must stay numerically consistent with the
//! server-side recomputation at submission, so both live here and treat
//! absent or invalid numeric input as zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::models::{
    Ingredient, IngredientCategory, IngredientWithSupplier, OrderItemInput, TemplateItem,
    TemplateItemInput,
};

/// Parse a raw form field, treating absent/invalid input as zero
fn parse_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// One in-progress order line, kept as the raw strings the user typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: String,
    pub unit_price: String,
}

/// Line-item selection for a new order, keyed by ingredient id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFormState {
    lines: BTreeMap<i64, OrderLine>,
}

impl OrderFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for an ingredient. A positive quantity adds or
    /// updates the line (new lines start at the ingredient's current
    /// default price); clearing to empty, zero, or an unparseable value
    /// removes it.
    pub fn set_quantity(&mut self, ingredient_id: i64, raw: &str, default_price: Decimal) {
        if parse_or_zero(raw) <= Decimal::ZERO {
            self.lines.remove(&ingredient_id);
            return;
        }

        match self.lines.get_mut(&ingredient_id) {
            Some(line) => line.quantity = raw.to_string(),
            None => {
                self.lines.insert(
                    ingredient_id,
                    OrderLine {
                        quantity: raw.to_string(),
                        unit_price: default_price.to_string(),
                    },
                );
            }
        }
    }

    /// Override the unit price of an existing line. Ignored for
    /// ingredients without a quantity, mirroring the disabled price
    /// input on untouched rows.
    pub fn set_unit_price(&mut self, ingredient_id: i64, raw: &str) {
        if let Some(line) = self.lines.get_mut(&ingredient_id) {
            line.unit_price = raw.to_string();
        }
    }

    /// Bulk-replace the selection from a template. Quantities come from
    /// the template; unit prices are always the ingredient's CURRENT
    /// default price (templates store no price). Template items whose
    /// ingredient no longer exists are skipped.
    pub fn load_template(&mut self, items: &[TemplateItem], ingredients: &[Ingredient]) {
        self.lines.clear();
        for item in items {
            let Some(ingredient) = ingredients.iter().find(|i| i.id == item.ingredient_id) else {
                continue;
            };
            self.lines.insert(
                item.ingredient_id,
                OrderLine {
                    quantity: item.quantity.to_string(),
                    unit_price: ingredient.default_price.to_string(),
                },
            );
        }
    }

    /// Running total across all lines, recomputed on every change
    pub fn total(&self) -> Decimal {
        self.lines
            .values()
            .map(|line| parse_or_zero(&line.quantity) * parse_or_zero(&line.unit_price))
            .sum()
    }

    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, ingredient_id: i64) -> Option<&OrderLine> {
        self.lines.get(&ingredient_id)
    }

    /// Materialize the selection for submission. The same arithmetic runs
    /// server-side, so the persisted totals always match what was shown.
    pub fn items(&self) -> Vec<OrderItemInput> {
        self.lines
            .iter()
            .map(|(&ingredient_id, line)| {
                let quantity = parse_or_zero(&line.quantity);
                let unit_price = parse_or_zero(&line.unit_price);
                OrderItemInput {
                    ingredient_id,
                    quantity,
                    unit_price,
                    total_price: quantity * unit_price,
                }
            })
            .collect()
    }
}

/// Line-item selection for a new template: quantities only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFormState {
    lines: BTreeMap<i64, String>,
}

impl TemplateFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantity(&mut self, ingredient_id: i64, raw: &str) {
        if parse_or_zero(raw) <= Decimal::ZERO {
            self.lines.remove(&ingredient_id);
        } else {
            self.lines.insert(ingredient_id, raw.to_string());
        }
    }

    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn items(&self) -> Vec<TemplateItemInput> {
        self.lines
            .iter()
            .map(|(&ingredient_id, raw)| TemplateItemInput {
                ingredient_id,
                quantity: parse_or_zero(raw),
            })
            .collect()
    }
}

/// Partition ingredients into the fixed category order for the form's
/// grouped sections. Empty categories are omitted.
pub fn group_by_category(
    ingredients: &[IngredientWithSupplier],
) -> Vec<(IngredientCategory, Vec<&IngredientWithSupplier>)> {
    IngredientCategory::ALL
        .iter()
        .filter_map(|&category| {
            let group: Vec<_> = ingredients
                .iter()
                .filter(|i| i.ingredient.category == category)
                .collect();
            if group.is_empty() {
                None
            } else {
                Some((category, group))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ingredient(id: i64, default_price: &str) -> Ingredient {
        Ingredient {
            id,
            name: format!("Ingredient {id}"),
            unit: "lb".to_string(),
            default_price: dec(default_price),
            category: IngredientCategory::Produce,
            supplier_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn positive_quantity_adds_line_at_default_price() {
        let mut form = OrderFormState::new();
        form.set_quantity(1, "2", dec("3.50"));

        let line = form.line(1).unwrap();
        assert_eq!(line.quantity, "2");
        assert_eq!(line.unit_price, "3.50");
        assert_eq!(form.total(), dec("7.00"));
    }

    #[test]
    fn clearing_quantity_removes_line() {
        let mut form = OrderFormState::new();
        form.set_quantity(1, "2", dec("3.50"));
        form.set_quantity(1, "", dec("3.50"));
        assert!(form.is_empty());

        form.set_quantity(1, "2", dec("3.50"));
        form.set_quantity(1, "0", dec("3.50"));
        assert!(form.is_empty());
    }

    #[test]
    fn price_edit_only_touches_existing_lines() {
        let mut form = OrderFormState::new();
        form.set_unit_price(1, "9.99");
        assert!(form.is_empty());

        form.set_quantity(1, "1", dec("3.50"));
        form.set_unit_price(1, "4.00");
        assert_eq!(form.total(), dec("4.00"));
    }

    #[test]
    fn quantity_edit_keeps_overridden_price() {
        let mut form = OrderFormState::new();
        form.set_quantity(1, "1", dec("3.50"));
        form.set_unit_price(1, "4.00");
        form.set_quantity(1, "3", dec("3.50"));
        assert_eq!(form.total(), dec("12.00"));
    }

    #[test]
    fn invalid_numeric_input_counts_as_zero() {
        let mut form = OrderFormState::new();
        form.set_quantity(1, "2", dec("3.50"));
        form.set_unit_price(1, "not a number");
        assert_eq!(form.total(), Decimal::ZERO);

        let items = form.items();
        assert_eq!(items[0].unit_price, Decimal::ZERO);
        assert_eq!(items[0].total_price, Decimal::ZERO);
    }

    #[test]
    fn load_template_uses_current_default_price() {
        let ingredients = vec![ingredient(1, "3.50"), ingredient(2, "10.00")];
        let items = vec![
            TemplateItem {
                id: 1,
                template_id: 7,
                ingredient_id: 1,
                quantity: dec("2"),
            },
            TemplateItem {
                id: 2,
                template_id: 7,
                ingredient_id: 2,
                quantity: dec("1"),
            },
        ];

        let mut form = OrderFormState::new();
        form.set_quantity(2, "99", dec("10.00"));
        form.load_template(&items, &ingredients);

        assert_eq!(form.item_count(), 2);
        assert_eq!(form.line(1).unwrap().unit_price, "3.50");
        assert_eq!(form.line(2).unwrap().quantity, "1");
        assert_eq!(form.total(), dec("17.00"));
    }

    #[test]
    fn load_template_skips_deleted_ingredients() {
        let ingredients = vec![ingredient(1, "3.50")];
        let items = vec![TemplateItem {
            id: 1,
            template_id: 7,
            ingredient_id: 42,
            quantity: dec("5"),
        }];

        let mut form = OrderFormState::new();
        form.load_template(&items, &ingredients);
        assert!(form.is_empty());
    }

    #[test]
    fn form_items_match_server_side_totals() {
        let mut form = OrderFormState::new();
        form.set_quantity(1, "2", dec("3.50"));
        form.set_quantity(2, "1", dec("10.00"));

        let items = form.items();
        assert_eq!(crate::validation::order_total(&items), dec("17.00"));
        for item in &items {
            assert!(crate::validation::validate_order_item(item).is_ok());
        }
    }

    #[test]
    fn template_form_holds_quantities_only() {
        let mut form = TemplateFormState::new();
        form.set_quantity(1, "2.5");
        form.set_quantity(2, "0");
        assert_eq!(form.item_count(), 1);
        assert_eq!(
            form.items(),
            vec![TemplateItemInput {
                ingredient_id: 1,
                quantity: dec("2.5"),
            }]
        );
    }

    #[test]
    fn grouping_follows_fixed_category_order() {
        let mk = |id, category| IngredientWithSupplier {
            ingredient: Ingredient {
                category,
                ..ingredient(id, "1.00")
            },
            supplier_name: "Valley Farms".to_string(),
        };
        let ingredients = vec![
            mk(1, IngredientCategory::Other),
            mk(2, IngredientCategory::Produce),
            mk(3, IngredientCategory::Produce),
        ];

        let groups = group_by_category(&ingredients);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, IngredientCategory::Produce);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, IngredientCategory::Other);
    }
}
