//! # Cart Pricing Engine
//!
//! The line items of a transaction and the arithmetic over them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Engine Call              Effect              │
//! │  ─────────                 ───────────              ──────              │
//! │                                                                         │
//! │  Pick suggestion ────────► add_item() ────────────► items.push(new)    │
//! │                                                                         │
//! │  − / + buttons ──────────► set_quantity() ────────► one item's qty     │
//! │                                                                         │
//! │  Type discount ──────────► set_discount() ────────► one item's %       │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ─────────► items.retain(..)   │
//! │                                                                         │
//! │  Total row ──────────────► total() ───────────────► (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Insertion order is display order.
//! - Adding the same product twice yields two line items.
//! - A line's final price is derived on read from unit price, quantity and
//!   discount. It is never stored, so it cannot drift.
//! - Quantity is always in `1..=MAX_ITEM_QUANTITY`, discount in `0..=100`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::policy::{DiscountPolicy, QuantityPolicy, QuantityUpdate};
use crate::types::CatalogEntry;
use crate::validation::{parse_discount_input, validate_unit_price};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One product selection in the cart.
///
/// ## Price Freezing
/// Name, unit price and MRP are copied from the catalog entry when the
/// item is added. Later catalog changes do not reach the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    id: String,
    product_id: String,
    name: String,
    unit_price: Money,
    mrp: Option<Money>,
    quantity: i64,
    discount_percent: u8,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    fn from_entry(entry: &CatalogEntry, quantity: i64) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            product_id: entry.id.clone(),
            name: entry.name.clone(),
            unit_price: entry.unit_price,
            mrp: entry.mrp,
            quantity,
            discount_percent: 0,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn mrp(&self) -> Option<Money> {
        self.mrp
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn discount_percent(&self) -> u8 {
        self.discount_percent
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Undiscounted line total (unit price × quantity).
    pub fn gross_price(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// `round((unit_price - unit_price * discount / 100) * quantity)`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Cart, CatalogEntry, Money, DiscountPolicy};
    ///
    /// let mut cart = Cart::new();
    /// let item = cart
    ///     .add_item(&CatalogEntry::new("p1", "Kit", Money::from_paise(1000)), 2)
    ///     .unwrap();
    /// cart.set_discount(item.id(), 10, DiscountPolicy::Clamp).unwrap();
    ///
    /// assert_eq!(cart.get(item.id()).unwrap().final_price().paise(), 1800);
    /// ```
    pub fn final_price(&self) -> Money {
        self.unit_price
            .discounted_line_total(self.quantity, self.discount_percent)
    }

    /// Amount taken off by the discount.
    pub fn discount_amount(&self) -> Money {
        self.gross_price() - self.final_price()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered line items of one transaction draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Appends a new line item for `entry`.
    ///
    /// Never merges with an existing line for the same product.
    ///
    /// ## Errors
    /// - `Validation` if the entry's price is negative or above
    ///   `MAX_UNIT_PRICE`
    /// - `InvalidQuantity` / `QuantityTooLarge` for a quantity outside
    ///   `1..=MAX_ITEM_QUANTITY`
    /// - `CartTooLarge` when the cart already holds `MAX_CART_ITEMS` lines
    pub fn add_item(&mut self, entry: &CatalogEntry, quantity: i64) -> CoreResult<LineItem> {
        validate_unit_price(entry.unit_price)?;

        if quantity < 1 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let item = LineItem::from_entry(entry, quantity);
        self.items.push(item.clone());
        Ok(item)
    }

    /// [`add_item`](Self::add_item) with quantity 1.
    pub fn add_product(&mut self, entry: &CatalogEntry) -> CoreResult<LineItem> {
        self.add_item(entry, 1)
    }

    /// Sets one item's quantity, resolved through `policy`.
    ///
    /// Under [`QuantityPolicy::ZeroRemoves`] a quantity of 0 or less removes
    /// the line; under the other policies the line always stays.
    pub fn set_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
        policy: QuantityPolicy,
    ) -> CoreResult<()> {
        let index = self.position(item_id)?;

        match policy.resolve(quantity)? {
            QuantityUpdate::Set(quantity) => self.items[index].quantity = quantity,
            QuantityUpdate::Remove => {
                self.items.remove(index);
            }
        }

        Ok(())
    }

    /// The "+" button.
    pub fn increment_quantity(&mut self, item_id: &str, policy: QuantityPolicy) -> CoreResult<()> {
        let current = self.get_existing(item_id)?.quantity;
        self.set_quantity(item_id, current + 1, policy)
    }

    /// The "−" button. With the default policy it stops at 1.
    pub fn decrement_quantity(&mut self, item_id: &str, policy: QuantityPolicy) -> CoreResult<()> {
        let current = self.get_existing(item_id)?.quantity;
        self.set_quantity(item_id, current - 1, policy)
    }

    /// Sets one item's discount percentage, resolved through `policy`.
    pub fn set_discount(
        &mut self,
        item_id: &str,
        discount_percent: i64,
        policy: DiscountPolicy,
    ) -> CoreResult<()> {
        let index = self.position(item_id)?;
        self.items[index].discount_percent = policy.resolve(discount_percent)?;
        Ok(())
    }

    /// Sets a discount from raw text input; non-numeric text counts as 0.
    pub fn set_discount_input(
        &mut self,
        item_id: &str,
        text: &str,
        policy: DiscountPolicy,
    ) -> CoreResult<()> {
        self.set_discount(item_id, parse_discount_input(text), policy)
    }

    /// Removes an item. Unknown ids are a no-op.
    ///
    /// ## Returns
    /// `true` if an item was removed.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up a line item by id.
    pub fn get(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of undiscounted line prices.
    pub fn gross_total(&self) -> Money {
        self.items.iter().map(LineItem::gross_price).sum()
    }

    /// Sum of discount amounts.
    pub fn discount_total(&self) -> Money {
        self.items.iter().map(LineItem::discount_amount).sum()
    }

    /// Sum of final prices; zero for an empty cart.
    pub fn total(&self) -> Money {
        compute_total(self)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, item_id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::LineItemNotFound(item_id.to_string()))
    }

    fn get_existing(&self, item_id: &str) -> CoreResult<&LineItem> {
        self.get(item_id)
            .ok_or_else(|| CoreError::LineItemNotFound(item_id.to_string()))
    }
}

/// Sum of all final prices in the cart.
pub fn compute_total(cart: &Cart) -> Money {
    cart.items.iter().map(LineItem::final_price).sum()
}

// =============================================================================
// Views
// =============================================================================

/// A line item with its derived prices, as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItemView {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub mrp: Option<Money>,
    pub quantity: i64,
    pub discount_percent: u8,
    pub final_price: Money,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        LineItemView {
            id: item.id.clone(),
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            mrp: item.mrp,
            quantity: item.quantity,
            discount_percent: item.discount_percent,
            final_price: item.final_price(),
        }
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub gross: Money,
    pub discount: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            gross: cart.gross_total(),
            discount: cart.discount_total(),
            total: cart.total(),
        }
    }
}
