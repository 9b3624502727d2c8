//! Sample invoices for demos and local development

use crate::core::error::InvoiceResult;
use crate::core::invoice::{InvoiceDraft, InvoiceStatus};
use crate::core::query::InvoiceQuery;
use crate::core::service::InvoiceService;

pub fn sample_invoices() -> Vec<InvoiceDraft> {
    [
        ("Internet Subscription", "INV202501", "2025-01-13", "582901", InvoiceStatus::Paid),
        ("Electricity Bill", "INV202502", "2025-02-04", "311909", InvoiceStatus::Paid),
        ("Gym Membership", "INV202503", "2025-02-23", "425000", InvoiceStatus::Unpaid),
        ("Phone Bill", "INV202504", "2025-02-23", "148891", InvoiceStatus::Pending),
    ]
    .into_iter()
    .map(|(name, number, due_date, amount, status)| InvoiceDraft {
        name: name.to_string(),
        number: number.to_string(),
        due_date: due_date.to_string(),
        amount: amount.to_string(),
        status,
    })
    .collect()
}

/// Insert the sample invoices unless the store already holds invoices
///
/// Returns how many were inserted.
pub async fn seed_if_empty(service: &dyn InvoiceService) -> InvoiceResult<usize> {
    if !service.list(&InvoiceQuery::default()).await?.is_empty() {
        return Ok(0);
    }

    let samples = sample_invoices();
    let count = samples.len();
    for draft in samples {
        service.create(draft).await?;
    }
    Ok(count)
}
