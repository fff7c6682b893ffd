//! Order template service
//!
//! Templates are created atomically with their items and deleted
//! wholesale; there is no item-level editing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use shared::models::{CreateTemplateInput, OrderTemplate, TemplateItem, TemplateWithItems};
use shared::validation::{validate_required, validate_template_item};

use crate::error::{AppError, AppResult};
use crate::views::{StaleView, ViewCache};

/// Template service for reusable order patterns
#[derive(Clone)]
pub struct TemplateService {
    db: PgPool,
    views: ViewCache,
}

type TemplateRow = (i64, String, Option<String>, DateTime<Utc>);

fn template_from_row(row: TemplateRow) -> OrderTemplate {
    OrderTemplate {
        id: row.0,
        name: row.1,
        description: row.2,
        created_at: row.3,
    }
}

impl TemplateService {
    /// Create a new TemplateService instance
    pub fn new(db: PgPool, views: ViewCache) -> Self {
        Self { db, views }
    }

    /// List all templates with their items, newest first
    pub async fn list(&self) -> AppResult<Vec<TemplateWithItems>> {
        let templates = sqlx::query_as::<_, TemplateRow>(
            r#"
            SELECT id, name, description, created_at
            FROM order_templates
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let items = sqlx::query_as::<_, (i64, i64, i64, Decimal)>(
            r#"
            SELECT id, template_id, ingredient_id, quantity
            FROM template_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(templates
            .into_iter()
            .map(template_from_row)
            .map(|template| {
                let template_items = items
                    .iter()
                    .filter(|r| r.1 == template.id)
                    .map(|r| TemplateItem {
                        id: r.0,
                        template_id: r.1,
                        ingredient_id: r.2,
                        quantity: r.3,
                    })
                    .collect();
                TemplateWithItems {
                    template,
                    items: template_items,
                }
            })
            .collect())
    }

    /// Create a template and its items in one transaction
    pub async fn create(&self, input: CreateTemplateInput) -> AppResult<TemplateWithItems> {
        validate_required(&input.name)
            .map_err(|_| AppError::ValidationError("Template name is required".to_string()))?;

        if input.items.is_empty() {
            return Err(AppError::ValidationError(
                "Template must have at least one item".to_string(),
            ));
        }

        for item in &input.items {
            validate_template_item(item)
                .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        }

        let description = input.description.filter(|d| !d.trim().is_empty());

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO order_templates (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&description)
        .fetch_one(&mut *tx)
        .await?;

        let template = template_from_row(row);

        let mut template_items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let item_row = sqlx::query_as::<_, (i64, i64, i64, Decimal)>(
                r#"
                INSERT INTO template_items (template_id, ingredient_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id, template_id, ingredient_id, quantity
                "#,
            )
            .bind(template.id)
            .bind(item.ingredient_id)
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await?;

            template_items.push(TemplateItem {
                id: item_row.0,
                template_id: item_row.1,
                ingredient_id: item_row.2,
                quantity: item_row.3,
            });
        }

        tx.commit().await?;

        self.views
            .invalidate(&[StaleView::Templates, StaleView::OrderForm]);
        Ok(TemplateWithItems {
            template,
            items: template_items,
        })
    }

    /// Delete a template and its items; nothing else references templates
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM order_templates WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Template".to_string()));
        }

        self.views
            .invalidate(&[StaleView::Templates, StaleView::OrderForm]);
        Ok(())
    }
}
