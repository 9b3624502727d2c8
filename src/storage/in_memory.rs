//! In-memory implementation of InvoiceService for testing and development

use crate::core::error::{InvoiceError, InvoiceResult, StorageError};
use crate::core::invoice::{Invoice, InvoiceDraft, InvoicePatch};
use crate::core::query::InvoiceQuery;
use crate::core::service::InvoiceService;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory invoice service
///
/// Invoices are kept in insertion order, so invoices sharing a due date list
/// in the order they were created. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceService {
    invoices: Arc<RwLock<Vec<Invoice>>>,
}

impl InMemoryInvoiceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already populated collection
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        Self {
            invoices: Arc::new(RwLock::new(invoices.into_iter().collect())),
        }
    }

    /// Number of stored invoices
    pub fn len(&self) -> InvoiceResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> InvoiceResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> InvoiceResult<RwLockReadGuard<'_, Vec<Invoice>>> {
        self.invoices.read().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> InvoiceResult<RwLockWriteGuard<'_, Vec<Invoice>>> {
        self.invoices.write().map_err(|e| {
            StorageError::LockPoisoned {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl InvoiceService for InMemoryInvoiceService {
    async fn list(&self, query: &InvoiceQuery) -> InvoiceResult<Vec<Invoice>> {
        let invoices = self.read()?;
        Ok(query.apply(invoices.iter().cloned()))
    }

    async fn get(&self, id: &Uuid) -> InvoiceResult<Invoice> {
        let invoices = self.read()?;
        invoices
            .iter()
            .find(|invoice| &invoice.id == id)
            .cloned()
            .ok_or(InvoiceError::NotFound { id: *id })
    }

    async fn create(&self, draft: InvoiceDraft) -> InvoiceResult<Uuid> {
        let mut invoices = self.write()?;

        let id = Uuid::new_v4();
        invoices.push(draft.into_invoice(id));

        Ok(id)
    }

    async fn update(&self, id: &Uuid, patch: InvoicePatch) -> InvoiceResult<()> {
        let mut invoices = self.write()?;

        let invoice = invoices
            .iter_mut()
            .find(|invoice| &invoice.id == id)
            .ok_or(InvoiceError::NotFound { id: *id })?;
        invoice.apply_patch(patch);

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> InvoiceResult<()> {
        let mut invoices = self.write()?;

        let position = invoices
            .iter()
            .position(|invoice| &invoice.id == id)
            .ok_or(InvoiceError::NotFound { id: *id })?;
        invoices.remove(position);

        Ok(())
    }
}
