//! HTTP handlers for ingredient management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use shared::models::IngredientInput;

use crate::error::AppResult;
use crate::services::IngredientService;
use crate::views::StaleView;
use crate::AppState;

/// List all ingredients with supplier names
pub async fn list_ingredients(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = IngredientService::new(state.db, state.views.clone());
    let ingredients = service.list().await?;
    state.views.refresh(StaleView::Ingredients);
    Ok(Json(ingredients))
}

/// Create an ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> AppResult<impl IntoResponse> {
    let service = IngredientService::new(state.db, state.views);
    let ingredient = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Update an ingredient
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i64>,
    Json(input): Json<IngredientInput>,
) -> AppResult<impl IntoResponse> {
    let service = IngredientService::new(state.db, state.views);
    let ingredient = service.update(ingredient_id, input).await?;
    Ok(Json(ingredient))
}

/// Delete an ingredient; fails while order or template lines reference it
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let service = IngredientService::new(state.db, state.views);
    service.delete(ingredient_id).await?;
    Ok(Json(()))
}
