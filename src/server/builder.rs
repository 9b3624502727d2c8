//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_invoice_routes, health_routes};
use crate::core::events::EventBus;
use crate::core::service::InvoiceService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the invoice HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_service(InMemoryInvoiceService::new())
///     .with_event_bus(1024)
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn InvoiceService>>,
    custom_routes: Vec<Router>,
    event_bus: Option<EventBus>,
    permissive_cors: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            service: None,
            custom_routes: Vec::new(),
            event_bus: None,
            permissive_cors: false,
        }
    }

    /// Set the invoice service (required)
    pub fn with_service(mut self, service: impl InvoiceService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set an invoice service that is already shared elsewhere
    pub fn with_shared_service(mut self, service: Arc<dyn InvoiceService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Add custom routes to the server
    ///
    /// Merged next to the invoice and health routes, e.g. for an export
    /// endpoint or a static front-end.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Publish mutation events on a new bus of the given capacity
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus = Some(EventBus::new(capacity));
        self
    }

    /// Publish mutation events on an existing bus
    ///
    /// Use this to subscribe before the server starts.
    pub fn with_shared_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Answer cross-origin requests from any origin
    ///
    /// For a browser front-end served from another host during development.
    pub fn with_permissive_cors(mut self) -> Self {
        self.permissive_cors = true;
        self
    }

    /// The configured event bus, if any
    pub fn event_bus(&self) -> Option<&EventBus> {
        self.event_bus.as_ref()
    }

    /// Build the final router
    ///
    /// Fails when no service was set.
    pub fn build(self) -> Result<Router> {
        let service = self
            .service
            .ok_or_else(|| anyhow::anyhow!("InvoiceService is required. Call .with_service()"))?;

        let state = AppState {
            service,
            event_bus: self.event_bus,
        };

        let mut app = health_routes().merge(build_invoice_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        if self.permissive_cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and serves until SIGTERM or Ctrl+C.
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_service(service)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
