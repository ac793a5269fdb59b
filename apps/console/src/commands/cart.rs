//! # Cart Commands
//!
//! Commands for line item manipulation.
//!
//! ## Line Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Item Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │ Product  │────►│ In Cart  │────►│  Submitted   │                    │
//! │  │ Search   │     │ qty 1    │     │  Summary     │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │                        │                                                │
//! │                   update_quantity                                       │
//! │                   increment / decrement                                 │
//! │                   set_discount                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   remove_from_cart ───► (gone)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole draft so the screen can re-render from
//! one value.

use serde::{Deserialize, Serialize};
use storefront_core::validation::parse_discount_input;
use storefront_core::{CartTotals, CustomerDraft, DraftAction, LineItemView, TransactionDraft};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Draft response: customer, priced line items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub customer: CustomerDraft,
    pub items: Vec<LineItemView>,
    pub totals: CartTotals,
    /// Total formatted for display, e.g. "₹3,798.00".
    pub formatted_total: String,
    /// Whether the checkout button is enabled.
    pub can_submit: bool,
}

impl DraftResponse {
    pub fn build(draft: &TransactionDraft, config: &ConfigState) -> Self {
        let totals = CartTotals::from(&draft.cart);
        DraftResponse {
            customer: draft.customer.clone(),
            items: draft.cart.items().iter().map(LineItemView::from).collect(),
            formatted_total: config.format_money(totals.total),
            can_submit: storefront_core::validate_for_checkout(
                &draft.cart,
                &draft.customer,
                config.require_valid_phone,
            )
            .is_ok(),
            totals,
        }
    }
}

/// A discount as sent by the client: a number, or the raw text of the
/// discount field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DiscountInput {
    Percent(i64),
    Fractional(f64),
    Text(String),
}

impl DiscountInput {
    /// Whole percent before policy is applied. Text follows the field's
    /// lenient parsing: non-numeric text is 0.
    pub fn percent(&self) -> i64 {
        match self {
            DiscountInput::Percent(p) => *p,
            DiscountInput::Fractional(f) => f.trunc() as i64,
            DiscountInput::Text(text) => parse_discount_input(text),
        }
    }
}

fn respond(session: &mut SessionState, action: DraftAction) -> Result<DraftResponse, ApiError> {
    session.dispatch(action)?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}

/// Gets the current draft.
pub fn get_draft(session: &SessionState) -> DraftResponse {
    debug!("get_draft command");
    DraftResponse::build(session.draft(), session.config())
}

/// Adds a catalog product as a new line item.
///
/// ## Behavior
/// - Quantity defaults to 1
/// - Price is frozen at the catalog price
/// - Adding the same product twice gives two line items
pub fn add_to_cart(
    session: &mut SessionState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %product_id, quantity = ?quantity, "add_to_cart command");
    session.add_product(product_id, quantity)?;
    Ok(DraftResponse::build(session.draft(), session.config()))
}

/// Sets a line item's quantity, subject to the quantity policy.
pub fn update_quantity(
    session: &mut SessionState,
    item_id: String,
    quantity: i64,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, quantity = %quantity, "update_quantity command");
    respond(session, DraftAction::SetQuantity { item_id, quantity })
}

/// The "+" button.
pub fn increment_quantity(
    session: &mut SessionState,
    item_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, "increment_quantity command");
    respond(session, DraftAction::IncrementQuantity { item_id })
}

/// The "-" button.
pub fn decrement_quantity(
    session: &mut SessionState,
    item_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, "decrement_quantity command");
    respond(session, DraftAction::DecrementQuantity { item_id })
}

/// Sets a line item's discount percent, subject to the discount policy.
pub fn set_discount(
    session: &mut SessionState,
    item_id: String,
    discount: DiscountInput,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, discount = ?discount, "set_discount command");
    let action = match discount {
        DiscountInput::Text(text) => DraftAction::SetDiscountInput { item_id, text },
        other => DraftAction::SetDiscount {
            item_id,
            percent: other.percent(),
        },
    };
    respond(session, action)
}

/// Removes a line item. Unknown ids are ignored.
pub fn remove_from_cart(
    session: &mut SessionState,
    item_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");
    respond(session, DraftAction::RemoveItem { item_id })
}
