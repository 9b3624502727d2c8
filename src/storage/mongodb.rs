//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoInvoiceService`, backed by a single collection of a
//! `mongodb::Database` (named `invoices` unless configured otherwise).
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! invoice-desk = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Invoices are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. The UUID is stored as a string under
//! MongoDB's `_id`, every other field keeps its camelCase JSON name
//! (`name`, `number`, `dueDate`, `amount`, `status`).
//!
//! List queries are pushed down: the search text becomes an escaped,
//! case-insensitive `$regex` on `name` and `number`, the status filter an
//! equality match, and the ordering a `dueDate` descending sort.

use crate::core::error::{InvoiceError, InvoiceResult, StorageError};
use crate::core::invoice::{Invoice, InvoiceDraft, InvoicePatch};
use crate::core::query::InvoiceQuery;
use crate::core::service::InvoiceService;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Collection, Database, IndexModel};
use tracing::debug;
use uuid::Uuid;

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "invoices";

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn query_error(context: &str, e: impl std::fmt::Display) -> InvoiceError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, e),
    }
    .into()
}

fn serialization_error(e: impl std::fmt::Display) -> InvoiceError {
    StorageError::SerializationError {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
    .into()
}

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> InvoiceResult<Document> {
    let bson_val = mongodb::bson::to_bson(&json).map_err(serialization_error)?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(serialization_error("expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn invoice_to_document(invoice: &Invoice) -> InvoiceResult<Document> {
    json_to_document(serde_json::to_value(invoice).map_err(serialization_error)?)
}

fn document_to_invoice(doc: Document) -> InvoiceResult<Invoice> {
    serde_json::from_value(document_to_json(doc)).map_err(serialization_error)
}

/// `$set` body replacing only the fields carried by the patch
fn patch_to_document(patch: &InvoicePatch) -> InvoiceResult<Document> {
    json_to_document(serde_json::to_value(patch).map_err(serialization_error)?)
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Filter document selecting the same invoices as `InvoiceQuery::matches`
fn query_filter(query: &InvoiceQuery) -> Document {
    let mut filter = Document::new();

    if !query.search.is_empty() {
        let pattern = regex::escape(&query.search);
        filter.insert(
            "$or",
            vec![
                doc! { "name": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "number": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }

    if let Some(status) = query.status.status() {
        filter.insert("status", status.as_str());
    }

    filter
}

// ---------------------------------------------------------------------------
// MongoInvoiceService
// ---------------------------------------------------------------------------

/// Invoice storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use invoice_desk::storage::MongoInvoiceService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let service = MongoInvoiceService::new(client.database("invoice_app"));
/// service.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoInvoiceService {
    database: Database,
    collection_name: String,
}

impl MongoInvoiceService {
    /// Use the default `invoices` collection of `database`
    pub fn new(database: Database) -> Self {
        Self::with_collection(database, DEFAULT_COLLECTION)
    }

    pub fn with_collection(database: Database, collection: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection.into(),
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.collection_name)
    }

    /// Create the indexes backing the list query.
    ///
    /// - `status` (filter)
    /// - `dueDate` descending (sort)
    ///
    /// Invoice numbers are deliberately not unique.
    pub async fn ensure_indexes(&self) -> InvoiceResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "status": 1 }).build(),
            IndexModel::builder().keys(doc! { "dueDate": -1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| query_error("Failed to create indexes", e))?;

        Ok(())
    }

    /// Check that the server answers
    pub async fn ping(&self) -> InvoiceResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| {
                InvoiceError::from(StorageError::ConnectionError {
                    backend: BACKEND.to_string(),
                    message: e.to_string(),
                })
            })?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceService for MongoInvoiceService {
    async fn list(&self, query: &InvoiceQuery) -> InvoiceResult<Vec<Invoice>> {
        let filter = query_filter(query);
        debug!(?filter, "listing invoices");

        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "dueDate": -1 })
            .await
            .map_err(|e| query_error("Failed to list invoices", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| query_error("Failed to collect invoices", e))?;

        docs.into_iter().map(document_to_invoice).collect()
    }

    async fn get(&self, id: &Uuid) -> InvoiceResult<Invoice> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| query_error("Failed to get invoice", e))?
            .ok_or(InvoiceError::NotFound { id: *id })?;

        document_to_invoice(doc)
    }

    async fn create(&self, draft: InvoiceDraft) -> InvoiceResult<Uuid> {
        let id = Uuid::new_v4();
        let doc = invoice_to_document(&draft.into_invoice(id))?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| query_error("Failed to create invoice", e))?;

        Ok(id)
    }

    async fn update(&self, id: &Uuid, patch: InvoicePatch) -> InvoiceResult<()> {
        // An empty $set is rejected by the server; only check existence
        if patch.is_empty() {
            return self.get(id).await.map(|_| ());
        }

        let result = self
            .collection()
            .update_one(
                doc! { "_id": uuid_bson(id) },
                doc! { "$set": patch_to_document(&patch)? },
            )
            .await
            .map_err(|e| query_error("Failed to update invoice", e))?;

        if result.matched_count == 0 {
            return Err(InvoiceError::NotFound { id: *id });
        }

        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> InvoiceResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| query_error("Failed to delete invoice", e))?;

        if result.deleted_count == 0 {
            return Err(InvoiceError::NotFound { id: *id });
        }

        Ok(())
    }
}
