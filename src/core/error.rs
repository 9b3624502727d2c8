//! Typed error handling for invoice operations
//!
//! Every failure the service can produce is an [`InvoiceError`]. Each
//! variant knows its HTTP status code and a stable error code, so handlers
//! simply return `InvoiceResult<T>` and let [`IntoResponse`] shape the body.
//!
//! # Error Categories
//!
//! - `Validation`: field-level rule violations, surfaced inline on the form
//! - `NotFound`: no invoice with the requested id
//! - `InvalidId`, `InvalidQuery`, `InvalidJson`: malformed requests
//! - `Storage`: anything the persistence layer failed at; the caller only
//!   ever sees a generic message, the detail goes to the logs
//!
//! # Example
//!
//! ```rust,ignore
//! match service.delete(&id).await {
//!     Ok(()) => println!("deleted"),
//!     Err(InvoiceError::NotFound { id }) => println!("{} was already gone", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Generic message returned for every storage failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// The main error type for invoice operations
#[derive(Debug)]
pub enum InvoiceError {
    /// One or more fields violate the invoice schema
    Validation(FieldErrors),

    /// No invoice with this id
    NotFound { id: Uuid },

    /// The id in the path is not a valid identifier
    InvalidId { value: String },

    /// The list query string could not be understood
    InvalidQuery { message: String },

    /// The request body is not the expected JSON
    InvalidJson { message: String },

    /// Storage backend failure
    Storage(StorageError),
}

impl fmt::Display for InvoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceError::Validation(errors) => write!(f, "{}", errors),
            InvoiceError::NotFound { id } => write!(f, "Invoice with id '{}' not found", id),
            InvoiceError::InvalidId { value } => write!(f, "Invalid invoice id: '{}'", value),
            InvoiceError::InvalidQuery { message } => write!(f, "Invalid query: {}", message),
            InvoiceError::InvalidJson { message } => write!(f, "Invalid JSON: {}", message),
            InvoiceError::Storage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvoiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoiceError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InvoiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InvoiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InvoiceError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            InvoiceError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            InvoiceError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            InvoiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoiceError::Validation(_) => "VALIDATION_ERROR",
            InvoiceError::NotFound { .. } => "INVOICE_NOT_FOUND",
            InvoiceError::InvalidId { .. } => "INVALID_ID",
            InvoiceError::InvalidQuery { .. } => "INVALID_QUERY",
            InvoiceError::InvalidJson { .. } => "INVALID_JSON",
            InvoiceError::Storage(e) => e.error_code(),
        }
    }

    /// Whether this is the `NotFound` variant
    pub fn is_not_found(&self) -> bool {
        matches!(self, InvoiceError::NotFound { .. })
    }

    /// Convert to an error response
    ///
    /// Storage failures never leak their detail to the caller.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            InvoiceError::Storage(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            InvoiceError::NotFound { .. } => "Invoice not found".to_string(),
            InvoiceError::Validation(_) => "Validation failed".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InvoiceError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            InvoiceError::NotFound { id } => Some(serde_json::json!({ "id": id.to_string() })),
            _ => None,
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        match &self {
            InvoiceError::Storage(e) => tracing::error!(error = %e, "storage failure"),
            InvoiceError::NotFound { id } => tracing::warn!(%id, "invoice not found"),
            InvoiceError::Validation(errors) => {
                tracing::warn!(fields = errors.len(), "invoice rejected by validation")
            }
            other => tracing::warn!(error = %other, "bad request"),
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field name → first violated rule message
///
/// Keys are the wire names of the invoice fields (`name`, `number`,
/// `dueDate`, `amount`, `status`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message for `field`, keeping the first one if already present
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no field failed, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl From<FieldErrors> for InvoiceError {
    fn from(errors: FieldErrors) -> Self {
        InvoiceError::Validation(errors)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },

    /// Stored data could not be converted to or from an invoice
    SerializationError { backend: String, message: String },

    /// A lock protecting in-process state was poisoned
    LockPoisoned { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::SerializationError { backend, message } => {
                write!(f, "{} serialization error: {}", backend, message)
            }
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire lock: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::SerializationError { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::LockPoisoned { .. } => "STORAGE_ERROR",
        }
    }
}

impl From<StorageError> for InvoiceError {
    fn from(err: StorageError) -> Self {
        InvoiceError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for InvoiceError {
    fn from(err: serde_json::Error) -> Self {
        InvoiceError::InvalidJson {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;

// =============================================================================
// Tests
// =============================================================================
