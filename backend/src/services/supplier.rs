//! Supplier management service

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shared::models::{Supplier, SupplierInput};
use shared::validation::validate_required;

use crate::error::{AppError, AppResult};
use crate::views::{StaleView, ViewCache};

/// Supplier service for CRUD over the supplier directory
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
    views: ViewCache,
}

type SupplierRow = (
    i64,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
);

fn supplier_from_row(row: SupplierRow) -> Supplier {
    Supplier {
        id: row.0,
        name: row.1,
        contact_info: row.2,
        email: row.3,
        phone: row.4,
        created_at: row.5,
    }
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool, views: ViewCache) -> Self {
        Self { db, views }
    }

    /// List all suppliers, ordered by name
    pub async fn list(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, contact_info, email, phone, created_at
            FROM suppliers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(supplier_from_row).collect())
    }

    /// Create a supplier
    pub async fn create(&self, input: SupplierInput) -> AppResult<Supplier> {
        let input = input.normalized();
        validate_required(&input.name).map_err(|_| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        })?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, contact_info, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, contact_info, email, phone, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_info)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await?;

        self.views.invalidate(&[StaleView::Suppliers]);
        Ok(supplier_from_row(row))
    }

    /// Update a supplier. The ingredient views show supplier names, so a
    /// rename invalidates both listings.
    pub async fn update(&self, id: i64, input: SupplierInput) -> AppResult<Supplier> {
        let input = input.normalized();
        validate_required(&input.name).map_err(|_| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
        })?;

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            UPDATE suppliers
            SET name = $1, contact_info = $2, email = $3, phone = $4
            WHERE id = $5
            RETURNING id, name, contact_info, email, phone, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_info)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        self.views
            .invalidate(&[StaleView::Suppliers, StaleView::Ingredients]);
        Ok(supplier_from_row(row))
    }

    /// Delete a supplier. Blocked while any ingredient still references it.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let referencing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE supplier_id = $1")
                .bind(id)
                .fetch_one(&self.db)
                .await?;

        if referencing > 0 {
            return Err(AppError::Conflict {
                resource: "supplier".to_string(),
                message: format!(
                    "Cannot delete supplier: {} ingredient(s) are still assigned to it",
                    referencing
                ),
            });
        }

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        self.views
            .invalidate(&[StaleView::Suppliers, StaleView::Ingredients]);
        Ok(())
    }
}
