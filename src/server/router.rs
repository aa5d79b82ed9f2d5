//! Router builder utilities

use crate::links::handlers::{
    AppState, create_row, delete_entity, dismiss_row, get_link, get_row, list_fields, list_links,
    list_rows, navigate,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build link routes
///
/// - GET /links - Compiled links
/// - GET /links/{link} - One link, by alias or service name
/// - GET /links/{link}/rows - Rows of a link
/// - POST /links/{link}/rows - Create a row
/// - GET /links/{link}/rows/{row_id} - One row
/// - DELETE /links/{link}/rows/{row_id} - Dismiss a row
/// - GET /modules/{module}/fields - Navigation fields of a module
/// - DELETE /modules/{module}/entities/{entity_id} - Apply cascade rules
/// - GET /modules/{module}/entities/{entity_id}/{field} - Navigate
pub fn build_link_routes(state: AppState) -> Router {
    Router::new()
        .route("/links", get(list_links))
        .route("/links/{link}", get(get_link))
        .route("/links/{link}/rows", get(list_rows).post(create_row))
        .route("/links/{link}/rows/{row_id}", get(get_row).delete(dismiss_row))
        .route("/modules/{module}/fields", get(list_fields))
        .route(
            "/modules/{module}/entities/{entity_id}",
            axum::routing::delete(delete_entity),
        )
        .route(
            "/modules/{module}/entities/{entity_id}/{field}",
            get(navigate),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
