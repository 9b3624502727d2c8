//! Invoice schema validation
//!
//! Rules are evaluated independently per field; every field is checked and
//! each failing field reports only the message of its first violated rule.
//!
//! | field   | rules                                   |
//! |---------|-----------------------------------------|
//! | name    | non-empty                               |
//! | number  | non-empty, then `INV` + 6 digits        |
//! | dueDate | non-empty                               |
//! | amount  | non-empty, then digits only             |
//! | status  | one of `Paid`, `Unpaid`, `Pending`      |

pub mod extractor;
pub mod validators;

pub use extractor::{Validate, ValidatedJson};

use crate::core::error::FieldErrors;
use crate::core::invoice::{
    InvoiceDraft, InvoiceForm, InvoicePatch, InvoicePatchForm, InvoiceStatus,
};
use regex::Regex;
use std::sync::LazyLock;
use validators::{Rule, first_violation, matches_pattern, one_of, required};

/// Wire names of the invoice fields
pub mod fields {
    pub const NAME: &str = "name";
    pub const NUMBER: &str = "number";
    pub const DUE_DATE: &str = "dueDate";
    pub const AMOUNT: &str = "amount";
    pub const STATUS: &str = "status";

    pub const ALL: [&str; 5] = [NAME, NUMBER, DUE_DATE, AMOUNT, STATUS];
}

pub const NAME_REQUIRED: &str = "Invoice name is required";
pub const NUMBER_REQUIRED: &str = "Invoice number is required";
pub const NUMBER_FORMAT: &str = "Invoice number must start with INV followed by 6 digits";
pub const DUE_DATE_REQUIRED: &str = "Due date is required";
pub const AMOUNT_REQUIRED: &str = "Amount is required";
pub const AMOUNT_FORMAT: &str = "Amount must be a number without decimals";
pub const STATUS_INVALID: &str = "Please select a valid status";

const STATUS_VALUES: &[&str] = &["Paid", "Unpaid", "Pending"];

// ASCII digits only; `\d` would also accept other Unicode digits.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^INV[0-9]{6}$").expect("invoice number pattern is valid"));
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("amount pattern is valid"));

static SCHEMA: LazyLock<Vec<(&'static str, Vec<Rule>)>> = LazyLock::new(|| {
    vec![
        (fields::NAME, vec![Box::new(required(NAME_REQUIRED)) as Rule]),
        (
            fields::NUMBER,
            vec![
                Box::new(required(NUMBER_REQUIRED)) as Rule,
                Box::new(matches_pattern(&NUMBER_PATTERN, NUMBER_FORMAT)) as Rule,
            ],
        ),
        (fields::DUE_DATE, vec![Box::new(required(DUE_DATE_REQUIRED)) as Rule]),
        (
            fields::AMOUNT,
            vec![
                Box::new(required(AMOUNT_REQUIRED)) as Rule,
                Box::new(matches_pattern(&AMOUNT_PATTERN, AMOUNT_FORMAT)) as Rule,
            ],
        ),
        (
            fields::STATUS,
            vec![Box::new(one_of(STATUS_VALUES, STATUS_INVALID)) as Rule],
        ),
    ]
});

/// Check one field against its rules
///
/// Returns the message of the first violated rule, or `None` when the value
/// is valid. Unknown field names have no rules and always pass.
pub fn check_field(field: &str, value: &str) -> Option<String> {
    SCHEMA
        .iter()
        .find(|(name, _)| *name == field)
        .and_then(|(_, rules)| first_violation(value, rules))
}

/// Validate a full candidate and produce a typed draft
pub fn validate_form(form: &InvoiceForm) -> Result<InvoiceDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let values = [
        (fields::NAME, form.name.as_str()),
        (fields::NUMBER, form.number.as_str()),
        (fields::DUE_DATE, form.due_date.as_str()),
        (fields::AMOUNT, form.amount.as_str()),
        (fields::STATUS, form.status.as_str()),
    ];
    for (field, value) in values {
        if let Some(message) = check_field(field, value) {
            errors.insert(field, message);
        }
    }

    // An unparsable status has already been recorded by the status rule.
    match form.status.parse::<InvoiceStatus>() {
        Ok(status) => errors.into_result(InvoiceDraft {
            name: form.name.clone(),
            number: form.number.clone(),
            due_date: form.due_date.clone(),
            amount: form.amount.clone(),
            status,
        }),
        Err(_) => Err(errors),
    }
}

/// Validate the supplied fields of a partial update
pub fn validate_patch(form: &InvoicePatchForm) -> Result<InvoicePatch, FieldErrors> {
    let mut errors = FieldErrors::new();
    let values = [
        (fields::NAME, form.name.as_deref()),
        (fields::NUMBER, form.number.as_deref()),
        (fields::DUE_DATE, form.due_date.as_deref()),
        (fields::AMOUNT, form.amount.as_deref()),
        (fields::STATUS, form.status.as_deref()),
    ];
    for (field, value) in values {
        if let Some(message) = value.and_then(|v| check_field(field, v)) {
            errors.insert(field, message);
        }
    }

    let status = form
        .status
        .as_deref()
        .and_then(|raw| raw.parse::<InvoiceStatus>().ok());

    errors.into_result(InvoicePatch {
        name: form.name.clone(),
        number: form.number.clone(),
        due_date: form.due_date.clone(),
        amount: form.amount.clone(),
        status,
    })
}
