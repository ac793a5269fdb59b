//! # Transaction Draft
//!
//! The whole new-transaction screen as one serializable value, updated by
//! a pure reducer.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   TransactionDraft ──┐                                                  │
//! │                      ├──► reduce() ──► Ok(new TransactionDraft)         │
//! │   DraftAction ───────┘        │                                         │
//! │                               └──────► Err(CoreError), input unchanged  │
//! │                                                                         │
//! │   TransactionDraft ──► submit() ──► TransactionSummary                  │
//! │                                     (caller then starts a new draft)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one state, "draft". Submission does not move the draft
//! into another state; it produces a summary and the caller discards the
//! draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartTotals, LineItemView};
use crate::customer::{CustomerDetails, CustomerDraft};
use crate::error::CoreResult;
use crate::policy::PricingPolicy;
use crate::types::{CatalogEntry, CustomerLabel, CustomerRecord};
use crate::validation::validate_for_checkout;

/// Everything the new-transaction screen holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionDraft {
    pub customer: CustomerDraft,
    pub cart: Cart,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// A user interaction on the transaction screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftAction {
    AddProduct {
        entry: CatalogEntry,
        #[serde(default)]
        quantity: Option<i64>,
    },
    #[serde(rename_all = "camelCase")]
    SetQuantity { item_id: String, quantity: i64 },
    #[serde(rename_all = "camelCase")]
    IncrementQuantity { item_id: String },
    #[serde(rename_all = "camelCase")]
    DecrementQuantity { item_id: String },
    #[serde(rename_all = "camelCase")]
    SetDiscount { item_id: String, percent: i64 },
    #[serde(rename_all = "camelCase")]
    SetDiscountInput { item_id: String, text: String },
    #[serde(rename_all = "camelCase")]
    RemoveItem { item_id: String },
    SetPhone { phone: String },
    SetName { name: String },
    SelectCustomer { customer: CustomerRecord },
    ToggleLabel { label: CustomerLabel },
    SetDetails { details: CustomerDetails },
    Reset,
}

impl TransactionDraft {
    /// Starts an empty draft.
    pub fn new() -> Self {
        TransactionDraft {
            customer: CustomerDraft::default(),
            cart: Cart::new(),
            created_at: Utc::now(),
        }
    }

    /// Applies one action in place.
    ///
    /// Every cart operation validates before it mutates, so on error the
    /// draft is unchanged.
    pub fn apply(&mut self, action: DraftAction, policy: PricingPolicy) -> CoreResult<()> {
        match action {
            DraftAction::AddProduct { entry, quantity } => {
                let item = self.cart.add_item(&entry, quantity.unwrap_or(1))?;
                debug!(item_id = %item.id(), product_id = %entry.id, "Line item added");
            }
            DraftAction::SetQuantity { item_id, quantity } => {
                self.cart.set_quantity(&item_id, quantity, policy.quantity)?;
            }
            DraftAction::IncrementQuantity { item_id } => {
                self.cart.increment_quantity(&item_id, policy.quantity)?;
            }
            DraftAction::DecrementQuantity { item_id } => {
                self.cart.decrement_quantity(&item_id, policy.quantity)?;
            }
            DraftAction::SetDiscount { item_id, percent } => {
                self.cart.set_discount(&item_id, percent, policy.discount)?;
            }
            DraftAction::SetDiscountInput { item_id, text } => {
                self.cart
                    .set_discount_input(&item_id, &text, policy.discount)?;
            }
            DraftAction::RemoveItem { item_id } => {
                if !self.cart.remove_item(&item_id) {
                    debug!(item_id = %item_id, "Remove ignored, no such line item");
                }
            }
            DraftAction::SetPhone { phone } => self.customer.phone = phone,
            DraftAction::SetName { name } => self.customer.name = name,
            DraftAction::SelectCustomer { customer } => self.customer.select(&customer),
            DraftAction::ToggleLabel { label } => {
                self.customer.toggle_label(label);
            }
            DraftAction::SetDetails { details } => {
                self.customer.details = details.normalized();
            }
            DraftAction::Reset => *self = TransactionDraft::new(),
        }

        Ok(())
    }

    /// Validates the draft and produces the record handed to whatever
    /// consumes a finished transaction.
    pub fn submit(&self, require_valid_phone: bool) -> CoreResult<TransactionSummary> {
        validate_for_checkout(&self.cart, &self.customer, require_valid_phone)?;

        Ok(TransactionSummary {
            id: Uuid::new_v4().to_string(),
            customer: self.customer.clone(),
            items: self.cart.items().iter().map(LineItemView::from).collect(),
            totals: CartTotals::from(&self.cart),
            submitted_at: Utc::now(),
        })
    }
}

/// Pure update: returns the next draft, leaving `draft` untouched.
///
/// ## Example
/// ```rust
/// use storefront_core::{reduce, CatalogEntry, DraftAction, Money, PricingPolicy, TransactionDraft};
///
/// let draft = TransactionDraft::new();
/// let next = reduce(
///     &draft,
///     DraftAction::AddProduct {
///         entry: CatalogEntry::new("1", "Blocks", Money::from_paise(1299)),
///         quantity: None,
///     },
///     PricingPolicy::default(),
/// )
/// .unwrap();
///
/// assert!(draft.cart.is_empty());
/// assert_eq!(next.cart.total().paise(), 1299);
/// ```
pub fn reduce(
    draft: &TransactionDraft,
    action: DraftAction,
    policy: PricingPolicy,
) -> CoreResult<TransactionDraft> {
    let mut next = draft.clone();
    next.apply(action, policy)?;
    Ok(next)
}

/// A validated, submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TransactionSummary {
    pub id: String,
    pub customer: CustomerDraft,
    pub items: Vec<LineItemView>,
    pub totals: CartTotals,
    #[ts(as = "String")]
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::policy::{DiscountPolicy, QuantityPolicy};

    fn add(draft: &TransactionDraft, price: i64) -> TransactionDraft {
        reduce(
            draft,
            DraftAction::AddProduct {
                entry: CatalogEntry::new("p", "Product", Money::from_paise(price)),
                quantity: None,
            },
            PricingPolicy::default(),
        )
        .unwrap()
    }

    fn first_item_id(draft: &TransactionDraft) -> String {
        draft.cart.items()[0].id().to_string()
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let draft = add(&TransactionDraft::new(), 1000);
        let item_id = first_item_id(&draft);

        let next = reduce(
            &draft,
            DraftAction::SetQuantity {
                item_id: item_id.clone(),
                quantity: 2,
            },
            PricingPolicy::default(),
        )
        .unwrap();

        assert_eq!(draft.cart.total().paise(), 1000);
        assert_eq!(next.cart.total().paise(), 2000);
    }

    #[test]
    fn test_reduce_error_keeps_previous_state() {
        let draft = add(&TransactionDraft::new(), 1000);
        let policy = PricingPolicy {
            quantity: QuantityPolicy::Reject,
            discount: DiscountPolicy::Reject,
        };

        let result = reduce(
            &draft,
            DraftAction::SetDiscount {
                item_id: first_item_id(&draft),
                percent: 120,
            },
            policy,
        );

        assert_eq!(result, Err(CoreError::InvalidDiscount(120)));
        assert_eq!(draft.cart.items()[0].discount_percent(), 0);
    }

    #[test]
    fn test_customer_actions() {
        let policy = PricingPolicy::default();
        let mut draft = TransactionDraft::new();

        draft
            .apply(DraftAction::SetPhone { phone: "98765".into() }, policy)
            .unwrap();
        draft
            .apply(
                DraftAction::SelectCustomer {
                    customer: CustomerRecord {
                        id: "2".into(),
                        name: "Priya Patel".into(),
                        phone: "+91 87654 32109".into(),
                        last_purchase: None,
                        total_spent: Money::zero(),
                    },
                },
                policy,
            )
            .unwrap();
        draft
            .apply(DraftAction::ToggleLabel { label: CustomerLabel::New }, policy)
            .unwrap();

        assert_eq!(draft.customer.name, "Priya Patel");
        assert_eq!(draft.customer.phone, "+91 87654 32109");
        assert_eq!(draft.customer.labels, vec![CustomerLabel::New]);
    }

    #[test]
    fn test_remove_unknown_is_ok() {
        let draft = add(&TransactionDraft::new(), 1000);
        let next = reduce(
            &draft,
            DraftAction::RemoveItem {
                item_id: "nope".into(),
            },
            PricingPolicy::default(),
        )
        .unwrap();
        assert_eq!(next.cart, draft.cart);
    }

    #[test]
    fn test_submit() {
        let mut draft = add(&TransactionDraft::new(), 1299);
        assert_eq!(draft.submit(false), Err(CoreError::MissingCustomerPhone));

        draft.customer = CustomerDraft::new("9876543210", "Rahul");
        let summary = draft.submit(true).unwrap();

        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.totals.total.paise(), 1299);
        assert_eq!(summary.customer.name, "Rahul");
    }

    #[test]
    fn test_submit_empty_cart() {
        let mut draft = TransactionDraft::new();
        draft.customer = CustomerDraft::new("9876543210", "Rahul");
        assert_eq!(draft.submit(false), Err(CoreError::EmptyCart));
    }

    #[test]
    fn test_reset() {
        let draft = add(&TransactionDraft::new(), 1000);
        let next = reduce(&draft, DraftAction::Reset, PricingPolicy::default()).unwrap();
        assert!(next.cart.is_empty());
        assert_eq!(next.customer, CustomerDraft::default());
    }

    #[test]
    fn test_draft_serializes_round_trip() {
        let mut draft = add(&TransactionDraft::new(), 1000);
        draft.customer = CustomerDraft::new("9876543210", "Rahul");

        let json = serde_json::to_string(&draft).unwrap();
        let restored: TransactionDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, draft);
    }

    #[test]
    fn test_action_wire_format() {
        let action: DraftAction = serde_json::from_str(
            r#"{"type": "set_discount_input", "itemId": "abc", "text": "12"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            DraftAction::SetDiscountInput {
                item_id: "abc".into(),
                text: "12".into()
            }
        );

        let action: DraftAction =
            serde_json::from_str(r#"{"type": "toggle_label", "label": "price_sensitive"}"#)
                .unwrap();
        assert_eq!(
            action,
            DraftAction::ToggleLabel {
                label: CustomerLabel::PriceSensitive
            }
        );
    }
}
