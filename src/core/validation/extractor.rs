//! Axum extractor for validated invoice payloads
//!
//! `ValidatedJson<F>` reads the request body as the raw form `F`, runs the
//! schema, and hands the handler the typed output. Invalid JSON answers 400,
//! rule violations answer 422 with one message per failing field.

use crate::core::error::{FieldErrors, InvoiceError};
use crate::core::invoice::{InvoiceDraft, InvoiceForm, InvoicePatch, InvoicePatchForm};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Raw payloads that can be validated into a typed value
pub trait Validate {
    /// The typed value produced by a successful validation
    type Output;

    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

impl Validate for InvoiceForm {
    type Output = InvoiceDraft;

    fn validate(&self) -> Result<InvoiceDraft, FieldErrors> {
        InvoiceForm::validate(self)
    }
}

impl Validate for InvoicePatchForm {
    type Output = InvoicePatch;

    fn validate(&self) -> Result<InvoicePatch, FieldErrors> {
        InvoicePatchForm::validate(self)
    }
}

/// Axum extractor that validates the JSON body before the handler runs
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     ValidatedJson(draft): ValidatedJson<InvoiceForm>,
/// ) -> InvoiceResult<impl IntoResponse> {
///     // draft is an InvoiceDraft that passed every rule
/// }
/// ```
pub struct ValidatedJson<F: Validate>(pub F::Output);

impl<F: Validate> ValidatedJson<F> {
    /// Get the validated value
    pub fn into_inner(self) -> F::Output {
        self.0
    }
}

impl<S, F> FromRequest<S> for ValidatedJson<F>
where
    S: Send + Sync,
    F: Validate + DeserializeOwned + Send,
{
    type Rejection = InvoiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(form): Json<F> = Json::from_request(req, state)
            .await
            .map_err(|e| InvoiceError::InvalidJson {
                message: e.body_text(),
            })?;

        form.validate()
            .map(ValidatedJson)
            .map_err(InvoiceError::Validation)
    }
}
