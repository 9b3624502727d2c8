//! HTTP handlers for the invoice collection

use crate::core::error::{InvoiceError, InvoiceResult};
use crate::core::events::{EventBus, InvoiceEvent};
use crate::core::invoice::{Invoice, InvoiceForm, InvoicePatchForm};
use crate::core::query::QueryParams;
use crate::core::service::InvoiceService;
use crate::core::validation::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Shared state of the invoice routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn InvoiceService>,
    /// Receives mutation events when configured
    pub event_bus: Option<EventBus>,
}

impl AppState {
    pub fn new(service: Arc<dyn InvoiceService>) -> Self {
        Self {
            service,
            event_bus: None,
        }
    }

    fn publish(&self, event: InvoiceEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

fn parse_id(raw: &str) -> InvoiceResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| InvoiceError::InvalidId {
        value: raw.to_string(),
    })
}

/// List invoices
///
/// GET /invoices?search=bill&status=Paid
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> InvoiceResult<Json<Vec<Invoice>>> {
    let query = params.into_query()?;
    let invoices = state.service.list(&query).await?;

    tracing::debug!(
        search = %query.search,
        status = %query.status,
        count = invoices.len(),
        "listed invoices"
    );
    Ok(Json(invoices))
}

/// Get one invoice
///
/// GET /invoices/{id}
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> InvoiceResult<Json<Invoice>> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(&id).await?))
}

/// Create an invoice
///
/// POST /invoices
/// Body: { "name": "...", "number": "INV202501", "dueDate": "2025-01-13", "amount": "582901", "status": "Paid" }
pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<InvoiceForm>,
) -> InvoiceResult<impl IntoResponse> {
    let id = state.service.create(draft.clone()).await?;
    tracing::info!(%id, number = %draft.number, "invoice created");

    state.publish(InvoiceEvent::Created {
        id,
        invoice: draft.into_invoice(id),
    });

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Replace the supplied fields of an invoice
///
/// PUT /invoices/{id}
/// Body: any subset of the invoice fields, e.g. { "status": "Paid" }
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<InvoicePatchForm>,
) -> InvoiceResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    state.service.update(&id, patch.clone()).await?;
    tracing::info!(%id, "invoice updated");

    state.publish(InvoiceEvent::Updated { id, patch });

    Ok(Json(json!({ "message": "Invoice updated successfully" })))
}

/// Delete an invoice
///
/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> InvoiceResult<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    state.service.delete(&id).await?;
    tracing::info!(%id, "invoice deleted");

    state.publish(InvoiceEvent::Deleted { id });

    Ok(Json(json!({ "message": "Invoice deleted successfully" })))
}
