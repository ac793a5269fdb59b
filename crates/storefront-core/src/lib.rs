//! # storefront-core: Transaction Engine for the Storefront App
//!
//! Pure business logic behind the "new transaction" screen: line item
//! pricing, cart totals, customer form state and checkout validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation layer (mobile screens)                │   │
//! │  │   Phone field ──► Product search ──► Line items ──► Checkout    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands (JSON)                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront-console                           │   │
//! │  │    session, config, command handlers                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │   cart   │ │  draft   │ │   validation     │  │   │
//! │  │   │  policy  │ │ customer │ │ catalog  │ │   product_form   │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer paise arithmetic
//! - [`types`] - Catalog entries, customer records, customer labels
//! - [`policy`] - Quantity and discount input policies
//! - [`cart`] - Line items, final prices and totals
//! - [`customer`] - Customer fields of a draft
//! - [`catalog`] - Provider traits and in-memory providers
//! - [`draft`] - Whole-screen state and its reducer
//! - [`validation`] - Field validators and the checkout gate
//! - [`product_form`] - Add-product form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, CatalogEntry, DiscountPolicy, Money};
//!
//! let mut cart = Cart::new();
//! let blocks = CatalogEntry::new("1", "Blocks", Money::from_paise(1299));
//! let kit = CatalogEntry::new("2", "Science Kit", Money::from_paise(2499));
//!
//! let first = cart.add_product(&blocks).unwrap();
//! cart.add_product(&kit).unwrap();
//! assert_eq!(cart.total().paise(), 3798);
//!
//! cart.set_discount(first.id(), 100, DiscountPolicy::Clamp).unwrap();
//! assert_eq!(cart.total().paise(), 2499);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod draft;
pub mod error;
pub mod money;
pub mod policy;
pub mod product_form;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_total, Cart, CartTotals, LineItem, LineItemView};
pub use catalog::{
    customer_suggestions, product_suggestions, CatalogProvider, CustomerDirectory,
    InMemoryCatalog, InMemoryCustomerDirectory,
};
pub use customer::{CustomerDetails, CustomerDraft};
pub use draft::{reduce, DraftAction, TransactionDraft, TransactionSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use policy::{DiscountPolicy, PricingPolicy, QuantityPolicy};
pub use product_form::{FormErrors, ProductForm};
pub use types::*;
pub use validation::{validate_for_checkout, validate_for_submission};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Catches a mistyped quantity (1000 instead of 10) before it reaches the
/// total.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a catalog entry may carry (₹100 crore).
///
/// A full cart at this price and `MAX_ITEM_QUANTITY` per line still fits
/// in i64 paise.
pub const MAX_UNIT_PRICE: Money = Money::from_rupees(1_000_000_000);

/// Phone input length at which customer suggestions appear.
pub const CUSTOMER_SUGGESTION_MIN_CHARS: usize = 3;

/// Product search length at which product suggestions appear.
pub const PRODUCT_SUGGESTION_MIN_CHARS: usize = 2;
