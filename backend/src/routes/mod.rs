//! Route definitions for the back-office server

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        // Supplier management
        .nest("/suppliers", supplier_routes())
        // Ingredient management
        .nest("/ingredients", ingredient_routes())
        // Purchase orders
        .nest("/orders", order_routes())
        // Order templates
        .nest("/templates", template_routes())
}

/// Supplier management routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            put(handlers::update_supplier).delete(handlers::delete_supplier),
        )
}

/// Ingredient management routes
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_ingredients).post(handlers::create_ingredient),
        )
        .route(
            "/:ingredient_id",
            put(handlers::update_ingredient).delete(handlers::delete_ingredient),
        )
}

/// Purchase order routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route(
            "/:order_id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route(
            "/:order_id/status",
            put(handlers::update_order_status),
        )
}

/// Order template routes
fn template_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route("/:template_id", delete(handlers::delete_template))
}
