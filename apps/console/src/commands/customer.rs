//! # Customer Commands
//!
//! Commands for the customer half of the transaction screen.
//!
//! ## Phone Field Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cashier types the phone number                                         │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  set_customer_phone { phone: "987" }                                    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  3+ characters? ── yes ──► suggestions from the directory      │    │
//! │  │        │                                                       │    │
//! │  │        no ──────────────► no suggestions                       │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Cashier taps "Rahul Sharma" ──► select_customer { customerId: "1" }    │
//! │                                  (fills phone and name)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{
    customer_suggestions as suggest, CustomerDetails, CustomerLabel, CustomerRecord,
    DraftAction,
};
use tracing::debug;

use super::cart::DraftResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// Draft plus the suggestions to show under the phone field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneResponse {
    pub draft: DraftResponse,
    pub suggestions: Vec<CustomerRecord>,
}

/// Updates the phone field and returns matching customers.
pub fn set_customer_phone(
    session: &mut SessionState,
    phone: String,
) -> Result<PhoneResponse, ApiError> {
    debug!(phone = %phone, "set_customer_phone command");
    session.dispatch(DraftAction::SetPhone { phone })?;

    let customer = &session.draft().customer;
    let suggestions = if customer.wants_suggestions() {
        suggest(
            session.customers(),
            &customer.phone,
            session.config().suggestion_limit,
        )
    } else {
        Vec::new()
    };

    Ok(PhoneResponse {
        draft: DraftResponse::build(session.draft(), session.config()),
        suggestions,
    })
}

pub fn set_customer_name(
    session: &mut SessionState,
    name: String,
) -> Result<DraftResponse, ApiError> {
    debug!(name = %name, "set_customer_name command");
    session.dispatch(DraftAction::SetName { name })?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}

/// Customers matching `query`, or the current phone input when no query
/// is given.
pub fn customer_suggestions(
    session: &SessionState,
    query: Option<&str>,
    limit: Option<usize>,
) -> Vec<CustomerRecord> {
    let query = query.unwrap_or(session.draft().customer.phone.as_str());
    debug!(query = %query, "customer_suggestions command");
    suggest(
        session.customers(),
        query,
        limit.unwrap_or(session.config().suggestion_limit),
    )
}

/// Fills phone and name from a directory record.
pub fn select_customer(
    session: &mut SessionState,
    customer_id: &str,
) -> Result<DraftResponse, ApiError> {
    debug!(customer_id = %customer_id, "select_customer command");
    session.select_customer(customer_id)?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}

/// Toggles a label chip by id ("price_sensitive", "loyal", "new", "vip").
pub fn toggle_label(session: &mut SessionState, label: &str) -> Result<DraftResponse, ApiError> {
    debug!(label = %label, "toggle_label command");
    let label = label.parse::<CustomerLabel>()?;
    session.dispatch(DraftAction::ToggleLabel { label })?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}

/// Saves the "more details" sheet.
pub fn set_customer_details(
    session: &mut SessionState,
    details: CustomerDetails,
) -> Result<DraftResponse, ApiError> {
    debug!("set_customer_details command");
    session.dispatch(DraftAction::SetDetails { details })?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}
