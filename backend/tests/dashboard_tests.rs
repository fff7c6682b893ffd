//! Dashboard aggregation tests
//!
//! The SQL does the real aggregation; these tests pin down the ranking
//! and window semantics it must implement, via in-memory simulations.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Mirror of the top-ingredients query: count order line references per
/// ingredient, rank by count descending, keep the first five.
fn top_ingredients(order_lines: &[i64]) -> Vec<(i64, i64)> {
    let mut counts: HashMap<i64, i64> = HashMap::new();
    for &ingredient_id in order_lines {
        *counts.entry(ingredient_id).or_insert(0) += 1;
    }

    let mut ranked: Vec<(i64, i64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(5);
    ranked
}

/// Mirror of the spend query: sum order totals created at or after the
/// window start.
fn spend_since(orders: &[(DateTime<Utc>, Decimal)], since: DateTime<Utc>) -> Decimal {
    orders
        .iter()
        .filter(|(created_at, _)| *created_at >= since)
        .map(|(_, total)| *total)
        .sum()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Ingredients rank by how many order lines reference them
    #[test]
    fn test_top_ingredients_ranked_by_reference_count() {
        let mut lines = Vec::new();
        lines.extend(std::iter::repeat(10).take(5)); // A: 5 references
        lines.extend(std::iter::repeat(20).take(3)); // B: 3
        lines.push(30); // C: 1

        let ranked = top_ingredients(&lines);
        assert_eq!(ranked, vec![(10, 5), (20, 3), (30, 1)]);
    }

    /// Only the five most-referenced ingredients appear
    #[test]
    fn test_top_ingredients_limited_to_five() {
        let mut lines = Vec::new();
        for ingredient_id in 1..=8 {
            lines.extend(std::iter::repeat(ingredient_id).take(ingredient_id as usize));
        }

        let ranked = top_ingredients(&lines);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0], (8, 8));
        assert_eq!(ranked[4], (4, 4));
    }

    #[test]
    fn test_top_ingredients_empty_without_orders() {
        assert!(top_ingredients(&[]).is_empty());
    }

    /// Orders created before the window start are excluded; the boundary
    /// instant itself is included
    #[test]
    fn test_spend_window_is_inclusive_at_start() {
        let since = Utc::now();
        let orders = vec![
            (since - Duration::seconds(1), dec("100.00")),
            (since, dec("25.50")),
            (since + Duration::hours(1), dec("10.00")),
        ];

        assert_eq!(spend_since(&orders, since), dec("35.50"));
    }

    #[test]
    fn test_spend_is_zero_without_orders() {
        assert_eq!(spend_since(&[], Utc::now()), Decimal::ZERO);
    }

    /// The weekly window trails the current instant by exactly seven days
    #[test]
    fn test_weekly_window_covers_trailing_seven_days() {
        let now = Utc::now();
        let since = now - Duration::days(7);
        let orders = vec![
            (now - Duration::days(8), dec("50.00")),
            (now - Duration::days(6), dec("20.00")),
            (now - Duration::days(1), dec("5.00")),
        ];

        assert_eq!(spend_since(&orders, since), dec("25.00"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The ranking is non-increasing and never longer than five
        #[test]
        fn prop_ranking_is_sorted_and_bounded(
            lines in prop::collection::vec(1i64..=12i64, 0..60)
        ) {
            let ranked = top_ingredients(&lines);
            prop_assert!(ranked.len() <= 5);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
            }
        }

        /// Every ranked count matches the actual number of references
        #[test]
        fn prop_ranked_counts_are_exact(
            lines in prop::collection::vec(1i64..=12i64, 0..60)
        ) {
            for (ingredient_id, count) in top_ingredients(&lines) {
                let actual = lines.iter().filter(|&&id| id == ingredient_id).count() as i64;
                prop_assert_eq!(count, actual);
            }
        }

        /// Windowed spend never exceeds the all-time sum, and widening the
        /// window never decreases it
        #[test]
        fn prop_spend_is_monotone_in_window(
            entries in prop::collection::vec((0i64..=30i64, amount_strategy()), 0..20)
        ) {
            let now = Utc::now();
            let orders: Vec<(DateTime<Utc>, Decimal)> = entries
                .iter()
                .map(|(days_ago, amount)| (now - Duration::days(*days_ago), *amount))
                .collect();

            let week = spend_since(&orders, now - Duration::days(7));
            let month = spend_since(&orders, now - Duration::days(31));
            let all_time: Decimal = orders.iter().map(|(_, amount)| *amount).sum();

            prop_assert!(week <= month);
            prop_assert!(month <= all_time);
        }
    }
}
