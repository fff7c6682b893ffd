//! WebAssembly module for the restaurant back-office UI
//!
//! Wraps the shared order/template form state so the browser computes
//! line totals and the running order total with exactly the arithmetic
//! the server applies at submission.

use rust_decimal::Decimal;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use shared::forms::{OrderFormState, TemplateFormState};
use shared::models::{Ingredient, TemplateItem};

fn parse_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// One order line's total: quantity * unit price, invalid input as zero
#[wasm_bindgen]
pub fn line_total(quantity: &str, unit_price: &str) -> String {
    (parse_or_zero(quantity) * parse_or_zero(unit_price)).to_string()
}

/// In-progress order form held by the new-order page
#[wasm_bindgen]
pub struct OrderForm {
    state: OrderFormState,
}

#[wasm_bindgen]
impl OrderForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> OrderForm {
        OrderForm {
            state: OrderFormState::new(),
        }
    }

    /// Set an ingredient's quantity; new lines start at the given
    /// current default price, clearing removes the line
    pub fn set_quantity(&mut self, ingredient_id: i64, quantity: &str, default_price: &str) {
        self.state
            .set_quantity(ingredient_id, quantity, parse_or_zero(default_price));
    }

    /// Override the unit price of an existing line
    pub fn set_unit_price(&mut self, ingredient_id: i64, unit_price: &str) {
        self.state.set_unit_price(ingredient_id, unit_price);
    }

    /// Bulk-replace the selection from a template (JSON arrays of
    /// template items and of the current ingredient catalog)
    pub fn load_template(
        &mut self,
        template_items_json: &str,
        ingredients_json: &str,
    ) -> Result<(), JsValue> {
        let items: Vec<TemplateItem> = serde_json::from_str(template_items_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid template items JSON: {}", e)))?;
        let ingredients: Vec<Ingredient> = serde_json::from_str(ingredients_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid ingredients JSON: {}", e)))?;

        self.state.load_template(&items, &ingredients);
        Ok(())
    }

    /// Running total across all lines
    pub fn total(&self) -> String {
        self.state.total().to_string()
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    /// Materialize the selection as the JSON item array the create-order
    /// endpoint accepts
    pub fn items_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.items())
            .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
    }
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

/// In-progress template form (quantities only)
#[wasm_bindgen]
pub struct TemplateForm {
    state: TemplateFormState,
}

#[wasm_bindgen]
impl TemplateForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TemplateForm {
        TemplateForm {
            state: TemplateFormState::new(),
        }
    }

    pub fn set_quantity(&mut self, ingredient_id: i64, quantity: &str) {
        self.state.set_quantity(ingredient_id, quantity);
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    pub fn items_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.items())
            .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
    }
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total("2", "3.50"), "7.00");
        assert_eq!(line_total("0.5", "10.00"), "5.000");
        assert_eq!(line_total("abc", "10.00"), "0.00");
        assert_eq!(line_total("", ""), "0");
    }

    #[test]
    fn test_order_form_total_tracks_edits() {
        let mut form = OrderForm::new();
        form.set_quantity(1, "2", "3.50");
        form.set_quantity(2, "1", "10.00");
        assert_eq!(form.total(), "17.00");

        form.set_quantity(2, "", "10.00");
        assert_eq!(form.item_count(), 1);
        assert_eq!(form.total(), "7.00");
    }

    #[test]
    fn test_load_template_uses_current_default_price() {
        let mut form = OrderForm::new();
        let template_items = r#"[{"id":1,"template_id":5,"ingredient_id":1,"quantity":"2"}]"#;
        let ingredients = r#"[{
            "id": 1,
            "name": "Tomatoes",
            "unit": "lb",
            "default_price": "3.50",
            "category": "Produce",
            "supplier_id": 1,
            "created_at": "2024-01-01T00:00:00Z"
        }]"#;

        form.load_template(template_items, ingredients).unwrap();
        assert_eq!(form.item_count(), 1);
        assert_eq!(form.total(), "7.00");
    }

    #[test]
    fn test_template_form_items_json() {
        let mut form = TemplateForm::new();
        form.set_quantity(3, "1.5");
        let json = form.items_json().unwrap();
        assert!(json.contains("\"ingredient_id\":3"));
    }
}
