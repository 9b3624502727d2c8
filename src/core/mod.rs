//! Core invoice domain: model, validation, querying and the storage trait

pub mod currency;
pub mod error;
pub mod events;
pub mod invoice;
pub mod numbering;
pub mod query;
pub mod service;
pub mod validation;

pub use error::{FieldErrors, InvoiceError, InvoiceResult, StorageError};
pub use events::{EventBus, EventEnvelope, InvoiceEvent};
pub use invoice::{
    Invoice, InvoiceDraft, InvoiceForm, InvoicePatch, InvoicePatchForm, InvoiceStatus,
    StatusFilter,
};
pub use query::{InvoiceQuery, QueryParams};
pub use service::InvoiceService;
