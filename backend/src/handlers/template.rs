//! HTTP handlers for order template endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use shared::models::CreateTemplateInput;

use crate::error::AppResult;
use crate::services::TemplateService;
use crate::views::StaleView;
use crate::AppState;

/// List all templates with their items (also feeds the order form)
pub async fn list_templates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = TemplateService::new(state.db, state.views.clone());
    let templates = service.list().await?;
    state.views.refresh(StaleView::Templates);
    state.views.refresh(StaleView::OrderForm);
    Ok(Json(templates))
}

/// Create a template with all its items
pub async fn create_template(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateInput>,
) -> AppResult<impl IntoResponse> {
    let service = TemplateService::new(state.db, state.views);
    let template = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Delete a template and its items
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = TemplateService::new(state.db, state.views);
    service.delete(template_id).await?;
    Ok(Json(()))
}
