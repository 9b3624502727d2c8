//! View controllers for the invoice list and the add/edit form
//!
//! Each view is one immutable state value driven by a single reducer:
//!
//! ```text
//! state.apply(event) -> (state', effects)
//! ```
//!
//! Reducers are pure. Effects that need the store (`Fetch`, `Delete`,
//! `Load`, `Create`, `Update`) are executed by the drivers
//! ([`ListController`], [`FormController`]), which feed each outcome back
//! into the reducer as a new event. Navigation effects are handed to the
//! caller.

pub mod form;
pub mod list;

pub use form::{FormController, FormEffect, FormEvent, FormMode, FormPhase, FormState};
pub use list::{DeleteFlow, ListController, ListEffect, ListEvent, ListPhase, ListState};

use serde::{Deserialize, Serialize};

pub const INVOICE_LIST_PATH: &str = "/invoices";

/// Path of the edit form of an invoice
pub fn edit_path(id: &uuid::Uuid) -> String {
    format!("{}/{}/edit", INVOICE_LIST_PATH, id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

/// Toast shown to the user after an action completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Success
    }
}

/// User-facing notification texts
pub mod messages {
    pub const INVOICE_DELETED: &str = "Invoice deleted successfully";
    pub const DELETE_FAILED: &str = "Failed to delete invoice";
    pub const FETCH_FAILED: &str = "Failed to fetch invoices";
    pub const INVOICE_ADDED: &str = "Invoice added successfully!";
    pub const INVOICE_UPDATED: &str = "Invoice updated successfully";
    pub const SAVE_FAILED: &str = "Failed to save invoice";
    pub const LOAD_FAILED: &str = "Failed to load invoice";
}
