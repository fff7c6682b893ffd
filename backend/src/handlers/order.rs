//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use shared::models::{CreateOrderInput, OrderStatus};

use crate::error::AppResult;
use crate::services::OrderService;
use crate::views::StaleView;
use crate::AppState;

/// List all orders, newest first
pub async fn list_orders(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db, state.views.clone());
    let orders = service.list().await?;
    state.views.refresh(StaleView::Orders);
    Ok(Json(orders))
}

/// Get an order with its items
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db, state.views.clone());
    let order = service.get(order_id).await?;
    state.views.refresh(StaleView::Order(order_id));
    Ok(Json(order))
}

/// Create an order with all its items. The created entity's id is the
/// client's redirect target for the detail view.
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db, state.views);
    let order = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

/// Move an order through its status lifecycle
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db, state.views);
    let order = service.update_status(order_id, input.status).await?;
    Ok(Json(order))
}

/// Delete an order and its items
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db, state.views);
    service.delete(order_id).await?;
    Ok(Json(()))
}
