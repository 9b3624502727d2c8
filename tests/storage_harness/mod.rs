//! Shared test harness for storage backend testing
//!
//! Provides invoice fixtures and two macro-generated contract suites:
//!
//! - `invoice_service_tests!`: the `InvoiceService` contract (CRUD, query
//!   semantics, not-found behavior, concurrent access)
//! - `rest_integration_tests!`: the same backend behind the full HTTP layer
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! invoice_service_tests!(InMemoryInvoiceService::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod invoice_service_tests;
#[macro_use]
pub mod rest_tests;

use invoice_desk::core::invoice::{InvoiceDraft, InvoiceStatus};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn draft(
    name: &str,
    number: &str,
    due_date: &str,
    amount: &str,
    status: InvoiceStatus,
) -> InvoiceDraft {
    InvoiceDraft {
        name: name.to_string(),
        number: number.to_string(),
        due_date: due_date.to_string(),
        amount: amount.to_string(),
        status,
    }
}

/// The four invoices of the demo data set
///
/// Due dates: 2025-01-13, 2025-02-04 and two on 2025-02-23.
pub fn sample_drafts() -> Vec<InvoiceDraft> {
    vec![
        draft("Internet Subscription", "INV202501", "2025-01-13", "582901", InvoiceStatus::Paid),
        draft("Electricity Bill", "INV202502", "2025-02-04", "311909", InvoiceStatus::Paid),
        draft("Gym Membership", "INV202503", "2025-02-23", "425000", InvoiceStatus::Unpaid),
        draft("Phone Bill", "INV202504", "2025-02-23", "148891", InvoiceStatus::Pending),
    ]
}

/// Request body for `POST /invoices`
pub fn invoice_json(name: &str, number: &str, due_date: &str, amount: &str, status: &str) -> Value {
    json!({
        "name": name,
        "number": number,
        "dueDate": due_date,
        "amount": amount,
        "status": status,
    })
}

pub fn numbers(invoices: &[invoice_desk::core::invoice::Invoice]) -> Vec<String> {
    invoices.iter().map(|i| i.number.clone()).collect()
}
