//! HTTP handlers for supplier management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use shared::models::SupplierInput;

use crate::error::AppResult;
use crate::services::SupplierService;
use crate::views::StaleView;
use crate::AppState;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = SupplierService::new(state.db, state.views.clone());
    let suppliers = service.list().await?;
    state.views.refresh(StaleView::Suppliers);
    Ok(Json(suppliers))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<SupplierInput>,
) -> AppResult<impl IntoResponse> {
    let service = SupplierService::new(state.db, state.views);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
    Json(input): Json<SupplierInput>,
) -> AppResult<impl IntoResponse> {
    let service = SupplierService::new(state.db, state.views);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Delete a supplier; fails while ingredients still reference it
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = SupplierService::new(state.db, state.views);
    service.delete(supplier_id).await?;
    Ok(Json(()))
}
