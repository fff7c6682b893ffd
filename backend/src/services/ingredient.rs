//! Ingredient management service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;

use shared::models::{Ingredient, IngredientCategory, IngredientInput, IngredientWithSupplier};
use shared::validation::{validate_price, validate_required};

use crate::error::{AppError, AppResult};
use crate::views::{StaleView, ViewCache};

/// Ingredient service for CRUD over the ingredient catalog
#[derive(Clone)]
pub struct IngredientService {
    db: PgPool,
    views: ViewCache,
}

type IngredientRow = (i64, String, String, Decimal, String, i64, DateTime<Utc>);

fn ingredient_from_row(row: IngredientRow) -> AppResult<Ingredient> {
    let category = IngredientCategory::from_str(&row.4)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!(e)))?;
    Ok(Ingredient {
        id: row.0,
        name: row.1,
        unit: row.2,
        default_price: row.3,
        category,
        supplier_id: row.5,
        created_at: row.6,
    })
}

impl IngredientService {
    /// Create a new IngredientService instance
    pub fn new(db: PgPool, views: ViewCache) -> Self {
        Self { db, views }
    }

    /// List all ingredients with their supplier names, in category order
    pub async fn list(&self) -> AppResult<Vec<IngredientWithSupplier>> {
        let rows = sqlx::query_as::<_, (i64, String, String, Decimal, String, i64, DateTime<Utc>, String)>(
            r#"
            SELECT i.id, i.name, i.unit, i.default_price, i.category, i.supplier_id,
                   i.created_at, s.name AS supplier_name
            FROM ingredients i
            JOIN suppliers s ON s.id = i.supplier_id
            ORDER BY i.category, i.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|row| {
                let supplier_name = row.7.clone();
                Ok(IngredientWithSupplier {
                    ingredient: ingredient_from_row((
                        row.0, row.1, row.2, row.3, row.4, row.5, row.6,
                    ))?,
                    supplier_name,
                })
            })
            .collect()
    }

    /// Create an ingredient. All fields are required; the referenced
    /// supplier must exist.
    pub async fn create(&self, input: IngredientInput) -> AppResult<Ingredient> {
        self.validate(&input).await?;

        let row = sqlx::query_as::<_, IngredientRow>(
            r#"
            INSERT INTO ingredients (name, unit, default_price, category, supplier_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, unit, default_price, category, supplier_id, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.default_price)
        .bind(input.category.as_str())
        .bind(input.supplier_id)
        .fetch_one(&self.db)
        .await?;

        self.views.invalidate(&[StaleView::Ingredients]);
        ingredient_from_row(row)
    }

    /// Update an ingredient. The order form shows default prices, so an
    /// edit invalidates it along with the listing.
    pub async fn update(&self, id: i64, input: IngredientInput) -> AppResult<Ingredient> {
        self.validate(&input).await?;

        let row = sqlx::query_as::<_, IngredientRow>(
            r#"
            UPDATE ingredients
            SET name = $1, unit = $2, default_price = $3, category = $4, supplier_id = $5
            WHERE id = $6
            RETURNING id, name, unit, default_price, category, supplier_id, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.unit.trim())
        .bind(input.default_price)
        .bind(input.category.as_str())
        .bind(input.supplier_id)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        self.views
            .invalidate(&[StaleView::Ingredients, StaleView::OrderForm]);
        ingredient_from_row(row)
    }

    /// Delete an ingredient. Blocked while any order or template line
    /// still references it, consistent with supplier deletion.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let referencing: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM order_items WHERE ingredient_id = $1)
                 + (SELECT COUNT(*) FROM template_items WHERE ingredient_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        if referencing > 0 {
            return Err(AppError::Conflict {
                resource: "ingredient".to_string(),
                message: format!(
                    "Cannot delete ingredient: {} order or template line(s) still reference it",
                    referencing
                ),
            });
        }

        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        self.views
            .invalidate(&[StaleView::Ingredients, StaleView::OrderForm]);
        Ok(())
    }

    /// All-or-nothing field validation, then supplier existence
    async fn validate(&self, input: &IngredientInput) -> AppResult<()> {
        if validate_required(&input.name).is_err() || validate_required(&input.unit).is_err() {
            return Err(AppError::ValidationError(
                "All fields are required".to_string(),
            ));
        }
        validate_price(input.default_price).map_err(|_| AppError::Validation {
            field: "default_price".to_string(),
            message: "Price cannot be negative".to_string(),
        })?;

        let supplier_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;

        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        Ok(())
    }
}
