//! HTTP server for the invoice API
//!
//! `ServerBuilder` wires an [`InvoiceService`](crate::core::InvoiceService)
//! into an axum router with:
//! - CRUD routes under `/invoices`
//! - health check routes (`/health`, `/healthz`)
//! - optional mutation events on an [`EventBus`](crate::core::EventBus)

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::{build_invoice_routes, health_routes};
