//! Invoice list view: filtering, loading and the delete flow
//!
//! ```text
//! load:    Idle ──▶ Loading ──▶ Loaded | Failed      (any filter change re-enters Loading)
//! delete:  MenuClosed ──▶ MenuOpen(id) ──▶ ConfirmPending(id) ──▶ Deleting(id) ──▶ Deleted(id) | DeleteFailed(id)
//!          cancel returns to MenuClosed from any state
//! ```
//!
//! Every fetch carries a sequence number. A result whose number is not the
//! latest one issued is discarded, so a slow response can never overwrite
//! the result of a newer filter.

use super::{Notification, edit_path, messages};
use crate::core::invoice::{Invoice, StatusFilter};
use crate::core::query::InvoiceQuery;
use crate::core::service::InvoiceService;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Row menu and confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    MenuClosed,
    MenuOpen(Uuid),
    ConfirmPending(Uuid),
    Deleting(Uuid),
    Deleted(Uuid),
    DeleteFailed(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// The view was shown; triggers the first fetch
    Opened,
    SearchChanged(String),
    StatusChanged(StatusFilter),
    /// Reload with the current filter
    Refresh,
    Fetched {
        seq: u64,
        result: Result<Vec<Invoice>, String>,
    },
    MenuOpened(Uuid),
    MenuClosed,
    EditSelected,
    DeleteSelected,
    DeleteConfirmed,
    DeleteCancelled,
    DeleteFinished {
        id: Uuid,
        result: Result<(), String>,
    },
    NotificationDismissed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEffect {
    Fetch { seq: u64, query: InvoiceQuery },
    Delete(Uuid),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub query: InvoiceQuery,
    pub phase: ListPhase,
    pub invoices: Vec<Invoice>,
    pub delete: DeleteFlow,
    pub notification: Option<Notification>,
    /// Sequence number of the latest fetch issued
    pub fetch_seq: u64,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    /// Run one event through the state machine
    pub fn apply(mut self, event: ListEvent) -> (Self, Vec<ListEffect>) {
        match event {
            ListEvent::Opened | ListEvent::Refresh => self.fetch(),
            ListEvent::SearchChanged(search) => {
                self.query.search = search;
                self.fetch()
            }
            ListEvent::StatusChanged(status) => {
                self.query.status = status;
                self.fetch()
            }
            ListEvent::Fetched { seq, result } => {
                if seq != self.fetch_seq {
                    return (self, vec![]);
                }
                match result {
                    Ok(invoices) => {
                        self.invoices = invoices;
                        self.phase = ListPhase::Loaded;
                    }
                    Err(_) => {
                        self.phase = ListPhase::Failed;
                        self.notification = Some(Notification::error(messages::FETCH_FAILED));
                    }
                }
                (self, vec![])
            }
            ListEvent::MenuOpened(id) => {
                if !matches!(self.delete, DeleteFlow::Deleting(_)) {
                    self.delete = DeleteFlow::MenuOpen(id);
                }
                (self, vec![])
            }
            ListEvent::MenuClosed => {
                if let DeleteFlow::MenuOpen(_) = self.delete {
                    self.delete = DeleteFlow::MenuClosed;
                }
                (self, vec![])
            }
            ListEvent::EditSelected => match self.delete {
                DeleteFlow::MenuOpen(id) => {
                    self.delete = DeleteFlow::MenuClosed;
                    (self, vec![ListEffect::Navigate(edit_path(&id))])
                }
                _ => (self, vec![]),
            },
            ListEvent::DeleteSelected => {
                if let DeleteFlow::MenuOpen(id) = self.delete {
                    self.delete = DeleteFlow::ConfirmPending(id);
                }
                (self, vec![])
            }
            ListEvent::DeleteConfirmed => match self.delete {
                DeleteFlow::ConfirmPending(id) => {
                    self.delete = DeleteFlow::Deleting(id);
                    (self, vec![ListEffect::Delete(id)])
                }
                _ => (self, vec![]),
            },
            ListEvent::DeleteCancelled => {
                self.delete = DeleteFlow::MenuClosed;
                (self, vec![])
            }
            ListEvent::DeleteFinished { id, result } => {
                match result {
                    Ok(()) => {
                        self.invoices.retain(|invoice| invoice.id != id);
                        self.delete = DeleteFlow::Deleted(id);
                        self.notification = Some(Notification::success(messages::INVOICE_DELETED));
                    }
                    Err(_) => {
                        self.delete = DeleteFlow::DeleteFailed(id);
                        self.notification = Some(Notification::error(messages::DELETE_FAILED));
                    }
                }
                (self, vec![])
            }
            ListEvent::NotificationDismissed => {
                self.notification = None;
                if matches!(
                    self.delete,
                    DeleteFlow::Deleted(_) | DeleteFlow::DeleteFailed(_)
                ) {
                    self.delete = DeleteFlow::MenuClosed;
                }
                (self, vec![])
            }
        }
    }

    fn fetch(mut self) -> (Self, Vec<ListEffect>) {
        self.fetch_seq += 1;
        self.phase = ListPhase::Loading;
        let effect = ListEffect::Fetch {
            seq: self.fetch_seq,
            query: self.query.clone(),
        };
        (self, vec![effect])
    }
}

/// Drives a [`ListState`] against an invoice store
///
/// Store effects run sequentially; navigation effects are queued for the
/// caller (see [`take_navigations`](Self::take_navigations)).
pub struct ListController<S: InvoiceService + ?Sized> {
    state: ListState,
    service: Arc<S>,
    navigations: Vec<String>,
}

impl<S: InvoiceService + ?Sized> ListController<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            state: ListState::new(),
            service,
            navigations: Vec::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Paths the view asked to navigate to, oldest first
    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.navigations)
    }

    /// Apply an event and run every effect it causes
    pub async fn dispatch(&mut self, event: ListEvent) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let (state, effects) = std::mem::take(&mut self.state).apply(event);
            self.state = state;

            for effect in effects {
                if let Some(outcome) = self.run(effect).await {
                    pending.push_back(outcome);
                }
            }
        }
    }

    async fn run(&mut self, effect: ListEffect) -> Option<ListEvent> {
        match effect {
            ListEffect::Fetch { seq, query } => {
                let result = self.service.list(&query).await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to fetch invoices");
                    e.to_string()
                });
                Some(ListEvent::Fetched { seq, result })
            }
            ListEffect::Delete(id) => {
                let result = self.service.delete(&id).await.map_err(|e| {
                    tracing::warn!(%id, error = %e, "failed to delete invoice");
                    e.to_string()
                });
                Some(ListEvent::DeleteFinished { id, result })
            }
            ListEffect::Navigate(path) => {
                self.navigations.push(path);
                None
            }
        }
    }
}
