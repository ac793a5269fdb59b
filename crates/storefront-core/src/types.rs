//! # Domain Types
//!
//! Core domain types shared by the catalog, the cart and the customer
//! draft.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │ CustomerRecord  │   │ CustomerLabel   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  PriceSensitive │       │
//! │  │  sku            │   │  name           │   │  Loyal          │       │
//! │  │  name           │   │  phone          │   │  New            │       │
//! │  │  unit_price     │   │  last_purchase  │   │  Vip            │       │
//! │  │  mrp            │   │  total_spent    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │          │                                                              │
//! │          └──► LineItem (cart.rs) snapshots name and price at add time   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product offered in the product suggestions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogEntry {
    /// Unique identifier.
    pub id: String,

    /// Stock Keeping Unit, if the store assigned one.
    pub sku: Option<String>,

    /// Display name.
    pub name: String,

    /// Selling price in paise.
    pub unit_price: Money,

    /// Maximum retail price in paise (display only).
    pub mrp: Option<Money>,

    /// Catalog category (one of the product form categories).
    pub category: Option<String>,
}

impl CatalogEntry {
    /// Creates an entry with just a name and price.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        CatalogEntry {
            id: id.into(),
            sku: None,
            name: name.into(),
            unit_price,
            mrp: None,
            category: None,
        }
    }

    /// Sets the MRP.
    pub fn with_mrp(mut self, mrp: Money) -> Self {
        self.mrp = Some(mrp);
        self
    }

    /// Sets the SKU.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Savings against MRP, if MRP is above the selling price.
    pub fn savings(&self) -> Option<Money> {
        self.mrp
            .filter(|mrp| *mrp > self.unit_price)
            .map(|mrp| mrp - self.unit_price)
    }
}

// =============================================================================
// Customer Record
// =============================================================================

/// A known customer from the customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    /// Phone as stored, e.g. "+91 98765 43210".
    pub phone: String,
    #[ts(as = "Option<String>")]
    pub last_purchase: Option<NaiveDate>,
    /// Lifetime spend in paise.
    pub total_spent: Money,
}

// =============================================================================
// Customer Label
// =============================================================================

/// The fixed set of labels a cashier can tag a customer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CustomerLabel {
    PriceSensitive,
    Loyal,
    New,
    Vip,
}

impl CustomerLabel {
    /// All labels in display order.
    pub const ALL: [CustomerLabel; 4] = [
        CustomerLabel::PriceSensitive,
        CustomerLabel::Loyal,
        CustomerLabel::New,
        CustomerLabel::Vip,
    ];

    /// Stable identifier used on the wire.
    pub const fn id(&self) -> &'static str {
        match self {
            CustomerLabel::PriceSensitive => "price_sensitive",
            CustomerLabel::Loyal => "loyal",
            CustomerLabel::New => "new",
            CustomerLabel::Vip => "vip",
        }
    }

    /// Human-readable label.
    pub const fn display_name(&self) -> &'static str {
        match self {
            CustomerLabel::PriceSensitive => "Price Sensitive",
            CustomerLabel::Loyal => "Loyal Customer",
            CustomerLabel::New => "New Customer",
            CustomerLabel::Vip => "VIP",
        }
    }

    /// Chip color shown when the label is selected.
    pub const fn color(&self) -> &'static str {
        match self {
            CustomerLabel::PriceSensitive => "#FF6B6B",
            CustomerLabel::Loyal => "#4ECDC4",
            CustomerLabel::New => "#FFD166",
            CustomerLabel::Vip => "#8338EC",
        }
    }
}

impl fmt::Display for CustomerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CustomerLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerLabel::ALL
            .into_iter()
            .find(|label| label.id() == s.trim())
            .ok_or_else(|| CoreError::UnknownLabel(s.to_string()))
    }
}
