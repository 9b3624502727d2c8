//! `invoice-server`: the invoice REST API over the configured store

use anyhow::Result;
use clap::Parser;
use invoice_desk::config::{AppConfig, StorageBackend};
use invoice_desk::core::InvoiceService;
use invoice_desk::server::ServerBuilder;
use invoice_desk::storage::{InMemoryInvoiceService, seed_if_empty};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "invoice-server", about = "Invoice management REST API", version)]
struct Cli {
    #[arg(
        long,
        env = "INVOICE_CONFIG",
        value_name = "FILE",
        help = "Path to a YAML configuration file"
    )]
    config: Option<PathBuf>,

    #[arg(long, value_name = "ADDR", help = "Address to listen on, e.g. 0.0.0.0:3000")]
    bind: Option<String>,

    #[arg(long, help = "Insert the sample invoices when the store is empty")]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    config.seed_sample_data |= cli.seed;

    init_tracing(&config.logging.filter);

    let service = build_service(&config).await?;

    if config.seed_sample_data {
        let inserted = seed_if_empty(service.as_ref()).await?;
        tracing::info!(inserted, "sample invoices seeded");
    }

    let mut builder = ServerBuilder::new().with_shared_service(service);
    if config.server.event_bus_capacity > 0 {
        builder = builder.with_event_bus(config.server.event_bus_capacity);
    }
    if config.server.cors_permissive {
        builder = builder.with_permissive_cors();
    }

    tracing::info!(
        "Starting {} v{} with {} storage",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.storage.backend
    );

    builder.serve(&config.server.bind_addr).await
}

/// `RUST_LOG` wins over the configured filter
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn build_service(config: &AppConfig) -> Result<Arc<dyn InvoiceService>> {
    match config.storage.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemoryInvoiceService::new())),
        StorageBackend::Mongodb => build_mongo_service(config).await,
    }
}

#[cfg(feature = "mongodb_backend")]
async fn build_mongo_service(config: &AppConfig) -> Result<Arc<dyn InvoiceService>> {
    use invoice_desk::storage::MongoInvoiceService;

    let client = mongodb::Client::with_uri_str(&config.storage.uri).await?;
    let service = MongoInvoiceService::with_collection(
        client.database(&config.storage.database),
        &config.storage.collection,
    );
    service.ping().await?;
    service.ensure_indexes().await?;

    tracing::info!(
        database = %config.storage.database,
        collection = %config.storage.collection,
        "connected to MongoDB"
    );
    Ok(Arc::new(service))
}

#[cfg(not(feature = "mongodb_backend"))]
async fn build_mongo_service(_config: &AppConfig) -> Result<Arc<dyn InvoiceService>> {
    anyhow::bail!("storage backend 'mongodb' requires the `mongodb_backend` feature")
}
