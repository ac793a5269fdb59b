//! # Checkout Commands
//!
//! Validation, submission and reset of the transaction draft.
//!
//! ## Checkout Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_transaction                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Cart empty? ───────────── yes ──► "Add at least one product..."        │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  Phone empty? ──────────── yes ──► "Customer phone number is required"  │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  Name empty? ───────────── yes ──► "Customer name is required"          │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  Phone pattern (if required) ────► "Invalid phone number: ..."          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  TransactionSummary, new empty draft                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::TransactionSummary;
use tracing::debug;

use super::cart::DraftResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// Result of a dry-run validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    /// First failing check, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// A submitted transaction as shown on the confirmation screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub store_name: String,
    pub transaction: TransactionSummary,
    pub formatted_total: String,
}

/// Checks the draft without submitting it.
pub fn validate_draft(session: &SessionState) -> ValidationReport {
    debug!("validate_draft command");
    match session.check() {
        Ok(()) => ValidationReport {
            valid: true,
            error: None,
        },
        Err(e) => ValidationReport {
            valid: false,
            error: Some(ApiError::from(e)),
        },
    }
}

/// Submits the draft. On success the session starts a new, empty draft.
pub fn submit_transaction(session: &mut SessionState) -> Result<SubmitResponse, ApiError> {
    debug!("submit_transaction command");
    let transaction = session.submit()?;
    let config = session.config();

    Ok(SubmitResponse {
        store_name: config.store_name.clone(),
        formatted_total: config.format_money(transaction.totals.total),
        transaction,
    })
}

/// Discards the draft.
pub fn reset_draft(session: &mut SessionState) -> DraftResponse {
    debug!("reset_draft command");
    session.reset();
    DraftResponse::build(session.draft(), session.config())
}
