//! Invoice list query: search text + status filter
//!
//! The same predicate is evaluated in process ([`InvoiceQuery::apply`]) and
//! pushed down to document stores by the storage backends; both must select
//! and order exactly the same invoices.

use crate::core::error::InvoiceError;
use crate::core::invoice::{Invoice, StatusFilter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Query parameters of `GET /invoices`
///
/// Both parameters are optional; the defaults select every invoice.
///
/// # Example
/// ```text
/// GET /invoices?search=bill&status=Paid
/// GET /invoices?status=all
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Case-insensitive substring of the name or number
    pub search: Option<String>,

    /// `all`, `Paid`, `Unpaid` or `Pending`
    pub status: Option<String>,
}

impl QueryParams {
    /// Parse into a typed query
    ///
    /// An empty status is treated as `all`; any other unknown value is an
    /// `InvalidQuery` error.
    pub fn into_query(self) -> Result<InvoiceQuery, InvoiceError> {
        let status = match self.status.as_deref() {
            None | Some("") => StatusFilter::All,
            Some(raw) => raw
                .parse::<StatusFilter>()
                .map_err(|message| InvoiceError::InvalidQuery { message })?,
        };

        Ok(InvoiceQuery {
            search: self.search.unwrap_or_default(),
            status,
        })
    }
}

/// Selection predicate over invoices
///
/// - a non-empty `search` must be a case-insensitive substring of the name
///   or of the number
/// - a `status` other than `All` must equal the invoice status
///
/// Both conditions are ANDed. `InvoiceQuery::default()` selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceQuery {
    pub search: String,
    pub status: StatusFilter,
}

impl InvoiceQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Whether `invoice` is selected by this query
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.matches_search(invoice) && self.status.accepts(invoice.status)
    }

    fn matches_search(&self, invoice: &Invoice) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        invoice.name.to_lowercase().contains(&needle)
            || invoice.number.to_lowercase().contains(&needle)
    }

    /// Filter and order a loaded collection
    pub fn apply(&self, invoices: impl IntoIterator<Item = Invoice>) -> Vec<Invoice> {
        let mut selected: Vec<Invoice> = invoices
            .into_iter()
            .filter(|invoice| self.matches(invoice))
            .collect();
        sort_by_due_date_desc(&mut selected);
        selected
    }
}

/// Latest due date first
///
/// Due dates are compared as stored text, the same way document stores sort
/// string fields. The sort is stable, so equal dates keep their input order.
pub fn sort_by_due_date_desc(invoices: &mut [Invoice]) {
    invoices.sort_by(|a, b| compare_due_date_desc(a, b));
}

fn compare_due_date_desc(a: &Invoice, b: &Invoice) -> Ordering {
    b.due_date.cmp(&a.due_date)
}
