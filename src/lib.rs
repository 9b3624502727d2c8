//! # Invoice Desk
//!
//! Invoice management over a document store: validated invoice records,
//! search/status filtering, a REST API and the state machines that drive
//! the list and form views.
//!
//! ## Features
//!
//! - **Schema validation**: per-field rules with one message per field
//! - **Query filtering**: case-insensitive search on name/number ANDed with a
//!   status filter, identical in memory and pushed down to MongoDB
//! - **Pluggable storage**: in-memory (default) or MongoDB (`mongodb_backend`)
//! - **REST exposure**: `/invoices` CRUD built with axum
//! - **View controllers**: immutable state + single reducer per view
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice_desk::prelude::*;
//!
//! let service = InMemoryInvoiceService::new();
//!
//! let draft = InvoiceForm {
//!     name: "Internet Subscription".into(),
//!     number: "INV202501".into(),
//!     due_date: "2025-01-13".into(),
//!     amount: "582901".into(),
//!     status: "Pending".into(),
//! }
//! .validate()?;
//!
//! let id = service.create(draft).await?;
//! let pending = service
//!     .list(&InvoiceQuery::new("", StatusFilter::Pending))
//!     .await?;
//!
//! let app = ServerBuilder::new().with_service(service).build()?;
//! ```

pub mod config;
pub mod controller;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        currency::format_rupiah,
        error::{FieldErrors, InvoiceError, InvoiceResult, StorageError},
        events::{EventBus, InvoiceEvent},
        invoice::{
            Invoice, InvoiceDraft, InvoiceForm, InvoicePatch, InvoicePatchForm, InvoiceStatus,
            StatusFilter,
        },
        numbering::generate_invoice_number,
        query::InvoiceQuery,
        service::InvoiceService,
    };

    // === Controllers ===
    pub use crate::controller::{
        FormController, FormEvent, FormState, ListController, ListEvent, ListState,
        Notification, Severity,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoInvoiceService;

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
