//! Validation helpers shared by the backend services and the form state

use rust_decimal::Decimal;

use crate::models::{OrderItemInput, TemplateItemInput};

/// Validate that a required text field is present and non-blank
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate a currency amount (default price, unit price)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// One order line's total: quantity * unit price
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    quantity * unit_price
}

/// Validate a submitted order line. The stored total is recomputed from
/// quantity * unit_price and the line is rejected if the submitted total
/// disagrees, so client arithmetic is never trusted at write time.
pub fn validate_order_item(item: &OrderItemInput) -> Result<(), &'static str> {
    validate_quantity(item.quantity)?;
    validate_price(item.unit_price)?;
    if item.total_price != line_total(item.quantity, item.unit_price) {
        return Err("Line total does not match quantity times unit price");
    }
    Ok(())
}

/// Sum of verified line totals, persisted as the order's total amount
pub fn order_total(items: &[OrderItemInput]) -> Decimal {
    items.iter().map(|item| item.total_price).sum()
}

/// Validate a submitted template line (quantity only; templates store no price)
pub fn validate_template_item(item: &TemplateItemInput) -> Result<(), &'static str> {
    validate_quantity(item.quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: &str, unit_price: &str) -> OrderItemInput {
        OrderItemInput {
            ingredient_id: 1,
            quantity: dec(quantity),
            unit_price: dec(unit_price),
            total_price: dec(quantity) * dec(unit_price),
        }
    }

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required("Flour").is_ok());
        assert!(validate_required("").is_err());
        assert!(validate_required("   ").is_err());
    }

    #[test]
    fn price_rejects_negative_allows_zero() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("12.50")).is_ok());
        assert!(validate_price(dec("-0.01")).is_err());
    }

    #[test]
    fn order_total_is_exact_sum_of_line_totals() {
        let items = vec![item("2", "3.50"), item("1", "10.00")];
        assert_eq!(order_total(&items), dec("17.00"));
    }

    #[test]
    fn tampered_line_total_is_rejected() {
        let mut tampered = item("2", "3.50");
        tampered.total_price = dec("5.00");
        assert_eq!(
            validate_order_item(&tampered),
            Err("Line total does not match quantity times unit price")
        );
    }

    #[test]
    fn fractional_quantities_are_supported() {
        let line = item("0.75", "4.00");
        assert!(validate_order_item(&line).is_ok());
        assert_eq!(line.total_price, dec("3.00"));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        assert!(validate_order_item(&item("0", "3.50")).is_err());
        assert!(validate_template_item(&TemplateItemInput {
            ingredient_id: 1,
            quantity: Decimal::ZERO,
        })
        .is_err());
    }
}
