//! # Console Commands Module
//!
//! Every command the transaction screen can send to the session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (wire format, dispatch)
//! ├── cart.rs      ◄─── Line items: add, quantity, discount, remove
//! ├── customer.rs  ◄─── Phone, name, suggestions, labels, details
//! ├── product.rs   ◄─── Product search, add-product form
//! ├── checkout.rs  ◄─── Validate, submit, reset
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Client writes one JSON object per line:                                │
//! │                                                                         │
//! │    {"command": "set_discount", "itemId": "…", "discount": 10}           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle_line() ── serde_json ──► Command::SetDiscount { .. }            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  execute() ──► cart::set_discount(&mut session, ..)                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Response, one JSON line:                                               │
//! │    {"ok": true, "data": {...}}                                          │
//! │    {"ok": false, "error": {"code": "...", "message": "..."}}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod customer;
pub mod product;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::{CustomerDetails, ProductForm};

use crate::error::ApiError;
use crate::state::SessionState;

use cart::DiscountInput;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    GetDraft,
    #[serde(rename_all = "camelCase")]
    SearchProducts {
        query: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_id: String,
        #[serde(default)]
        quantity: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateQuantity { item_id: String, quantity: i64 },
    #[serde(rename_all = "camelCase")]
    IncrementQuantity { item_id: String },
    #[serde(rename_all = "camelCase")]
    DecrementQuantity { item_id: String },
    #[serde(rename_all = "camelCase")]
    SetDiscount {
        item_id: String,
        discount: DiscountInput,
    },
    #[serde(rename_all = "camelCase")]
    RemoveFromCart { item_id: String },
    SetCustomerPhone { phone: String },
    SetCustomerName { name: String },
    CustomerSuggestions {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        limit: Option<usize>,
    },
    #[serde(rename_all = "camelCase")]
    SelectCustomer { customer_id: String },
    ToggleLabel { label: String },
    SetCustomerDetails { details: CustomerDetails },
    CreateProduct { form: ProductForm },
    ValidateDraft,
    SubmitTransaction,
    ResetDraft,
    GetConfig,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Parses and runs one command line. Never fails: parse and domain errors
/// become error responses.
pub fn handle_line(session: &mut SessionState, line: &str) -> Response {
    let result = serde_json::from_str::<Command>(line)
        .map_err(ApiError::from)
        .and_then(|command| execute(session, command));
    Response::from(result)
}

/// Runs one command against the session.
pub fn execute(session: &mut SessionState, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::GetDraft => to_data(cart::get_draft(session)),
        Command::SearchProducts { query, limit } => {
            to_data(product::search_products(session, &query, limit)?)
        }
        Command::AddToCart {
            product_id,
            quantity,
        } => to_data(cart::add_to_cart(session, &product_id, quantity)?),
        Command::UpdateQuantity { item_id, quantity } => {
            to_data(cart::update_quantity(session, item_id, quantity)?)
        }
        Command::IncrementQuantity { item_id } => {
            to_data(cart::increment_quantity(session, item_id)?)
        }
        Command::DecrementQuantity { item_id } => {
            to_data(cart::decrement_quantity(session, item_id)?)
        }
        Command::SetDiscount { item_id, discount } => {
            to_data(cart::set_discount(session, item_id, discount)?)
        }
        Command::RemoveFromCart { item_id } => to_data(cart::remove_from_cart(session, item_id)?),
        Command::SetCustomerPhone { phone } => {
            to_data(customer::set_customer_phone(session, phone)?)
        }
        Command::SetCustomerName { name } => to_data(customer::set_customer_name(session, name)?),
        Command::CustomerSuggestions { query, limit } => {
            to_data(customer::customer_suggestions(session, query.as_deref(), limit))
        }
        Command::SelectCustomer { customer_id } => {
            to_data(customer::select_customer(session, &customer_id)?)
        }
        Command::ToggleLabel { label } => to_data(customer::toggle_label(session, &label)?),
        Command::SetCustomerDetails { details } => {
            to_data(customer::set_customer_details(session, details)?)
        }
        Command::CreateProduct { form } => to_data(product::create_product(session, &form)?),
        Command::ValidateDraft => to_data(checkout::validate_draft(session)),
        Command::SubmitTransaction => to_data(checkout::submit_transaction(session)?),
        Command::ResetDraft => to_data(checkout::reset_draft(session)),
        Command::GetConfig => to_data(config::get_config(session)),
    }
}

fn to_data<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}
