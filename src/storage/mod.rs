//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
pub mod seed;

pub use in_memory::InMemoryInvoiceService;
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoInvoiceService;
pub use seed::{sample_invoices, seed_if_empty};
