//! HTTP handler for the dashboard

use axum::{extract::State, Json};
use chrono::Utc;

use crate::services::dashboard::{DashboardMetrics, DashboardService};
use crate::views::StaleView;
use crate::AppState;

/// Dashboard metrics. Never fails: the service degrades to an
/// all-zero/empty payload if aggregation cannot complete.
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardMetrics> {
    let service = DashboardService::new(state.db);
    let metrics = service.metrics(Utc::now()).await;
    state.views.refresh(StaleView::Dashboard);
    Json(metrics)
}
