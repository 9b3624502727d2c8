//! Invoice mutation events
//!
//! Handlers publish an [`InvoiceEvent`] after every successful create,
//! update and delete. Anything interested in changes (an audit log, a live
//! view) subscribes to the bus; with no subscribers the event is dropped.
//!
//! ```text
//! POST   /invoices       ──┐
//! PUT    /invoices/{id}  ──┼──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! DELETE /invoices/{id}  ──┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(1024);
//! let mut rx = event_bus.subscribe();
//!
//! event_bus.publish(InvoiceEvent::Deleted { id });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.event.action(), envelope.event.invoice_id());
//! }
//! ```

use crate::core::invoice::{Invoice, InvoicePatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// A change made to the invoice collection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InvoiceEvent {
    /// An invoice was stored
    Created { id: Uuid, invoice: Invoice },
    /// Some fields of an invoice were replaced
    Updated { id: Uuid, patch: InvoicePatch },
    /// An invoice was deleted
    Deleted { id: Uuid },
}

impl InvoiceEvent {
    pub fn invoice_id(&self) -> Uuid {
        match self {
            InvoiceEvent::Created { id, .. }
            | InvoiceEvent::Updated { id, .. }
            | InvoiceEvent::Deleted { id } => *id,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            InvoiceEvent::Created { .. } => "created",
            InvoiceEvent::Updated { .. } => "updated",
            InvoiceEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an invoice event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    pub event: InvoiceEvent,
}

impl EventEnvelope {
    pub fn new(event: InvoiceEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; every clone publishes into the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per slow receiver
    ///
    /// Receivers that fall further behind get `Lagged` on their next recv().
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: InvoiceEvent) -> usize {
        // send() only errors when nobody is listening
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
