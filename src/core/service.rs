//! Service trait for invoice storage

use crate::core::error::InvoiceResult;
use crate::core::invoice::{Invoice, InvoiceDraft, InvoicePatch};
use crate::core::query::InvoiceQuery;
use async_trait::async_trait;
use uuid::Uuid;

/// Gateway to the invoice collection
///
/// Implementations store invoices in a single logical collection keyed by
/// id. They never validate: callers hand them drafts and patches that have
/// already passed the schema.
///
/// Missing ids always produce `InvoiceError::NotFound`, no matter how many
/// times the same call is repeated.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Invoices selected by `query`, latest due date first
    ///
    /// Returns an empty vec (not an error) when nothing matches.
    async fn list(&self, query: &InvoiceQuery) -> InvoiceResult<Vec<Invoice>>;

    /// Get an invoice by id
    async fn get(&self, id: &Uuid) -> InvoiceResult<Invoice>;

    /// Store a draft and return its newly assigned id
    async fn create(&self, draft: InvoiceDraft) -> InvoiceResult<Uuid>;

    /// Replace the supplied fields of an existing invoice
    async fn update(&self, id: &Uuid, patch: InvoicePatch) -> InvoiceResult<()>;

    /// Delete an invoice
    async fn delete(&self, id: &Uuid) -> InvoiceResult<()>;
}
