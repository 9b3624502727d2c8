//! Route table of the invoice API

use super::handlers::{
    AppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build the invoice routes
///
/// - GET    /invoices       - List invoices (`?search=&status=`)
/// - POST   /invoices       - Create an invoice
/// - GET    /invoices/{id}  - Get an invoice
/// - PUT    /invoices/{id}  - Update the supplied fields of an invoice
/// - DELETE /invoices/{id}  - Delete an invoice
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
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
