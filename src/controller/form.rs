//! Add/edit invoice form
//!
//! ```text
//! Create:     Editing ──submit──▶ Submitting ──▶ Submitted | Editing
//! Edit(id):   Loading ──▶ Editing ──submit──▶ Submitting ──▶ Submitted | Editing
//! ```
//!
//! A submit that fails validation stores the field errors and emits
//! nothing; the store is only called with values that passed every rule.

use super::{INVOICE_LIST_PATH, Notification, messages};
use crate::core::error::FieldErrors;
use crate::core::invoice::{Invoice, InvoiceDraft, InvoiceForm, InvoicePatch};
use crate::core::numbering::next_invoice_number;
use crate::core::service::InvoiceService;
use crate::core::validation::fields;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Loading,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The form was shown; edit mode loads the stored invoice
    Opened,
    Loaded(Result<Invoice, String>),
    /// `field` is a wire name from [`fields`]; unknown names are ignored
    FieldChanged { field: String, value: String },
    RegenerateNumber,
    Submit,
    Saved(Result<(), String>),
    NotificationDismissed,
}

impl FormEvent {
    pub fn field_changed(field: &str, value: impl Into<String>) -> Self {
        FormEvent::FieldChanged {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEffect {
    Load(Uuid),
    Create(InvoiceDraft),
    Update(Uuid, InvoicePatch),
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub mode: FormMode,
    pub values: InvoiceForm,
    pub errors: FieldErrors,
    pub phase: FormPhase,
    pub notification: Option<Notification>,
}

impl FormState {
    /// Empty add form, prefilled with a generated invoice number
    pub fn create() -> Self {
        Self::create_with_number(next_invoice_number())
    }

    pub fn create_with_number(number: impl Into<String>) -> Self {
        Self {
            mode: FormMode::Create,
            values: InvoiceForm {
                number: number.into(),
                ..Default::default()
            },
            errors: FieldErrors::new(),
            phase: FormPhase::Editing,
            notification: None,
        }
    }

    /// Edit form for a stored invoice; values arrive with `Loaded`
    pub fn edit(id: Uuid) -> Self {
        Self {
            mode: FormMode::Edit(id),
            values: InvoiceForm::default(),
            errors: FieldErrors::new(),
            phase: FormPhase::Loading,
            notification: None,
        }
    }

    pub fn apply(mut self, event: FormEvent) -> (Self, Vec<FormEffect>) {
        match event {
            FormEvent::Opened => match self.mode {
                FormMode::Edit(id) => {
                    self.phase = FormPhase::Loading;
                    (self, vec![FormEffect::Load(id)])
                }
                FormMode::Create => (self, vec![]),
            },
            FormEvent::Loaded(result) => {
                if self.phase != FormPhase::Loading {
                    return (self, vec![]);
                }
                match result {
                    Ok(invoice) => self.values = InvoiceForm::from(&invoice),
                    Err(_) => self.notification = Some(Notification::error(messages::LOAD_FAILED)),
                }
                self.phase = FormPhase::Editing;
                (self, vec![])
            }
            FormEvent::FieldChanged { field, value } => {
                if self.set_field(&field, value) {
                    self.errors.remove(&field);
                }
                (self, vec![])
            }
            FormEvent::RegenerateNumber => {
                self.values.number = next_invoice_number();
                self.errors.remove(fields::NUMBER);
                (self, vec![])
            }
            FormEvent::Submit => self.submit(),
            FormEvent::Saved(result) => {
                if self.phase != FormPhase::Submitting {
                    return (self, vec![]);
                }
                match result {
                    Ok(()) => {
                        let message = match self.mode {
                            FormMode::Create => messages::INVOICE_ADDED,
                            FormMode::Edit(_) => messages::INVOICE_UPDATED,
                        };
                        self.phase = FormPhase::Submitted;
                        self.notification = Some(Notification::success(message));
                        (self, vec![FormEffect::Navigate(INVOICE_LIST_PATH.to_string())])
                    }
                    Err(_) => {
                        self.phase = FormPhase::Editing;
                        self.notification = Some(Notification::error(messages::SAVE_FAILED));
                        (self, vec![])
                    }
                }
            }
            FormEvent::NotificationDismissed => {
                self.notification = None;
                (self, vec![])
            }
        }
    }

    fn submit(mut self) -> (Self, Vec<FormEffect>) {
        if self.phase != FormPhase::Editing {
            return (self, vec![]);
        }

        match self.values.validate() {
            Err(errors) => {
                self.errors = errors;
                (self, vec![])
            }
            Ok(draft) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                let effect = match self.mode {
                    FormMode::Create => FormEffect::Create(draft),
                    FormMode::Edit(id) => FormEffect::Update(id, InvoicePatch::from(draft)),
                };
                (self, vec![effect])
            }
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            fields::NAME => &mut self.values.name,
            fields::NUMBER => &mut self.values.number,
            fields::DUE_DATE => &mut self.values.due_date,
            fields::AMOUNT => &mut self.values.amount,
            fields::STATUS => &mut self.values.status,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Drives a [`FormState`] against an invoice store
pub struct FormController<S: InvoiceService + ?Sized> {
    state: FormState,
    service: Arc<S>,
    navigations: Vec<String>,
}

impl<S: InvoiceService + ?Sized> FormController<S> {
    pub fn new(service: Arc<S>, state: FormState) -> Self {
        Self {
            state,
            service,
            navigations: Vec::new(),
        }
    }

    pub fn create(service: Arc<S>) -> Self {
        Self::new(service, FormState::create())
    }

    pub fn edit(service: Arc<S>, id: Uuid) -> Self {
        Self::new(service, FormState::edit(id))
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn take_navigations(&mut self) -> Vec<String> {
        std::mem::take(&mut self.navigations)
    }

    pub async fn dispatch(&mut self, event: FormEvent) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let (state, effects) = self.state.clone().apply(event);
            self.state = state;

            for effect in effects {
                if let Some(outcome) = self.run(effect).await {
                    pending.push_back(outcome);
                }
            }
        }
    }

    async fn run(&mut self, effect: FormEffect) -> Option<FormEvent> {
        match effect {
            FormEffect::Load(id) => {
                let result = self.service.get(&id).await.map_err(|e| {
                    tracing::warn!(%id, error = %e, "failed to load invoice");
                    e.to_string()
                });
                Some(FormEvent::Loaded(result))
            }
            FormEffect::Create(draft) => {
                let result = self.service.create(draft).await.map(|id| {
                    tracing::info!(%id, "invoice added from form");
                });
                Some(FormEvent::Saved(result.map_err(|e| {
                    tracing::warn!(error = %e, "failed to add invoice");
                    e.to_string()
                })))
            }
            FormEffect::Update(id, patch) => {
                let result = self.service.update(&id, patch).await.map_err(|e| {
                    tracing::warn!(%id, error = %e, "failed to update invoice");
                    e.to_string()
                });
                Some(FormEvent::Saved(result))
            }
            FormEffect::Navigate(path) => {
                self.navigations.push(path);
                None
            }
        }
    }
}
