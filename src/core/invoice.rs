//! Invoice data model
//!
//! An invoice moves through three shapes:
//!
//! - [`InvoiceForm`]: raw candidate as typed by a user (every field is text)
//! - [`InvoiceDraft`]: validated candidate, not yet stored (no `id`)
//! - [`Invoice`]: stored record, `id` assigned by the store
//!
//! Partial updates follow the same split with [`InvoicePatchForm`] and
//! [`InvoicePatch`].

use crate::core::currency::format_rupiah;
use crate::core::error::FieldErrors;
use crate::core::validation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
    Pending,
}

impl InvoiceStatus {
    /// Every status, in display order
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Paid,
        InvoiceStatus::Unpaid,
        InvoiceStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    /// Exact, case-sensitive match on the stored spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown invoice status '{}'", s))
    }
}

/// Status selector of the list view
///
/// `All` matches every status; the other variants match exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    Paid,
    Unpaid,
    Pending,
}

impl StatusFilter {
    /// The status this filter pins, or `None` for `All`
    pub fn status(&self) -> Option<InvoiceStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Paid => Some(InvoiceStatus::Paid),
            StatusFilter::Unpaid => Some(InvoiceStatus::Unpaid),
            StatusFilter::Pending => Some(InvoiceStatus::Pending),
        }
    }

    /// Whether an invoice with `status` passes this filter
    pub fn accepts(&self, status: InvoiceStatus) -> bool {
        self.status().is_none_or(|wanted| wanted == status)
    }

    pub fn as_str(&self) -> &'static str {
        match self.status() {
            Some(status) => status.as_str(),
            None => "all",
        }
    }
}

impl From<InvoiceStatus> for StatusFilter {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Paid => StatusFilter::Paid,
            InvoiceStatus::Unpaid => StatusFilter::Unpaid,
            InvoiceStatus::Pending => StatusFilter::Pending,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse::<InvoiceStatus>()
            .map(StatusFilter::from)
            .map_err(|_| format!("status must be one of all, Paid, Unpaid, Pending (got '{}')", s))
    }
}

/// Raw invoice candidate, exactly as submitted by a form or a request body
///
/// Missing keys deserialize to empty text so that the validator reports
/// them as required instead of failing on the JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceForm {
    pub name: String,
    pub number: String,
    pub due_date: String,
    pub amount: String,
    pub status: String,
}

impl InvoiceForm {
    /// Validate every field and produce a typed draft
    pub fn validate(&self) -> Result<InvoiceDraft, FieldErrors> {
        validation::validate_form(self)
    }
}

impl From<&Invoice> for InvoiceForm {
    fn from(invoice: &Invoice) -> Self {
        Self {
            name: invoice.name.clone(),
            number: invoice.number.clone(),
            due_date: invoice.due_date.clone(),
            amount: invoice.amount.clone(),
            status: invoice.status.to_string(),
        }
    }
}

/// Validated invoice that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub name: String,
    pub number: String,
    pub due_date: String,
    pub amount: String,
    pub status: InvoiceStatus,
}

impl InvoiceDraft {
    /// Attach a store-assigned identifier
    pub fn into_invoice(self, id: Uuid) -> Invoice {
        Invoice {
            id,
            name: self.name,
            number: self.number,
            due_date: self.due_date,
            amount: self.amount,
            status: self.status,
        }
    }
}

/// Stored invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub due_date: String,
    pub amount: String,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Amount rendered as Rupiah text, e.g. `Rp 582.901`
    ///
    /// Returns `None` when the stored amount is not an unsigned integer.
    pub fn formatted_amount(&self) -> Option<String> {
        self.amount.parse::<u128>().ok().map(format_rupiah)
    }

    /// Replace the fields supplied by `patch`, leaving the others untouched
    pub fn apply_patch(&mut self, patch: InvoicePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Raw partial update; only the supplied keys are validated and applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatchForm {
    pub name: Option<String>,
    pub number: Option<String>,
    pub due_date: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl InvoicePatchForm {
    /// Validate the supplied fields and produce a typed patch
    pub fn validate(&self) -> Result<InvoicePatch, FieldErrors> {
        validation::validate_patch(self)
    }
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

impl InvoicePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.number.is_none()
            && self.due_date.is_none()
            && self.amount.is_none()
            && self.status.is_none()
    }
}

impl From<InvoiceDraft> for InvoicePatch {
    /// A patch that replaces every field (used by the edit form)
    fn from(draft: InvoiceDraft) -> Self {
        Self {
            name: Some(draft.name),
            number: Some(draft.number),
            due_date: Some(draft.due_date),
            amount: Some(draft.amount),
            status: Some(draft.status),
        }
    }
}
