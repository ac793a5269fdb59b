//! # Pricing Policy
//!
//! How out-of-range quantity and discount input is handled.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quantity input          ClampToOne     ZeroRemoves     Reject          │
//! │  ──────────────          ──────────     ───────────     ──────          │
//! │   3                      qty = 3        qty = 3         qty = 3         │
//! │   0                      qty = 1        line removed    InvalidQuantity │
//! │  -2                      qty = 1        line removed    InvalidQuantity │
//! │                                                                         │
//! │  Discount input          Clamp          Reject                          │
//! │  ──────────────          ─────          ──────                          │
//! │   15                     15%            15%                             │
//! │   140                    100%           InvalidDiscount                 │
//! │  -5                      0%             InvalidDiscount                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities above `MAX_ITEM_QUANTITY` are an error under every policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::MAX_ITEM_QUANTITY;

/// What a quantity update resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// Store this quantity (always in `1..=MAX_ITEM_QUANTITY`).
    Set(i64),
    /// Drop the line item.
    Remove,
}

/// Floor behavior for quantity updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuantityPolicy {
    /// Values below 1 become 1. The decrement button bottoms out.
    #[default]
    ClampToOne,
    /// Values of 0 or less remove the line item.
    ZeroRemoves,
    /// Values below 1 are an error.
    Reject,
}

impl QuantityPolicy {
    /// Resolves a requested quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::policy::{QuantityPolicy, QuantityUpdate};
    ///
    /// assert_eq!(QuantityPolicy::ClampToOne.resolve(0).unwrap(), QuantityUpdate::Set(1));
    /// assert_eq!(QuantityPolicy::ZeroRemoves.resolve(0).unwrap(), QuantityUpdate::Remove);
    /// assert!(QuantityPolicy::Reject.resolve(0).is_err());
    /// ```
    pub fn resolve(&self, requested: i64) -> CoreResult<QuantityUpdate> {
        if requested > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if requested >= 1 {
            return Ok(QuantityUpdate::Set(requested));
        }

        match self {
            QuantityPolicy::ClampToOne => Ok(QuantityUpdate::Set(1)),
            QuantityPolicy::ZeroRemoves => Ok(QuantityUpdate::Remove),
            QuantityPolicy::Reject => Err(CoreError::InvalidQuantity(requested)),
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityPolicy::ClampToOne => write!(f, "clamp_to_one"),
            QuantityPolicy::ZeroRemoves => write!(f, "zero_removes"),
            QuantityPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for QuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp_to_one" | "clamp" => Ok(QuantityPolicy::ClampToOne),
            "zero_removes" | "remove" => Ok(QuantityPolicy::ZeroRemoves),
            "reject" => Ok(QuantityPolicy::Reject),
            _ => Err(format!("Unknown quantity policy: {}", s)),
        }
    }
}

/// Bounds behavior for discount updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountPolicy {
    /// Values are clamped into [0, 100].
    #[default]
    Clamp,
    /// Values outside [0, 100] are an error.
    Reject,
}

impl DiscountPolicy {
    /// Resolves a requested discount percentage.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::policy::DiscountPolicy;
    ///
    /// assert_eq!(DiscountPolicy::Clamp.resolve(140).unwrap(), 100);
    /// assert_eq!(DiscountPolicy::Clamp.resolve(-5).unwrap(), 0);
    /// assert!(DiscountPolicy::Reject.resolve(140).is_err());
    /// ```
    pub fn resolve(&self, requested: i64) -> CoreResult<u8> {
        match self {
            DiscountPolicy::Clamp => Ok(requested.clamp(0, 100) as u8),
            DiscountPolicy::Reject if (0..=100).contains(&requested) => Ok(requested as u8),
            DiscountPolicy::Reject => Err(CoreError::InvalidDiscount(requested)),
        }
    }
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPolicy::Clamp => write!(f, "clamp"),
            DiscountPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for DiscountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clamp" => Ok(DiscountPolicy::Clamp),
            "reject" => Ok(DiscountPolicy::Reject),
            _ => Err(format!("Unknown discount policy: {}", s)),
        }
    }
}

/// Both input policies together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricingPolicy {
    #[serde(default)]
    pub quantity: QuantityPolicy,
    #[serde(default)]
    pub discount: DiscountPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_in_range_passes_through() {
        for policy in [
            QuantityPolicy::ClampToOne,
            QuantityPolicy::ZeroRemoves,
            QuantityPolicy::Reject,
        ] {
            assert_eq!(policy.resolve(1).unwrap(), QuantityUpdate::Set(1));
            assert_eq!(policy.resolve(42).unwrap(), QuantityUpdate::Set(42));
            assert_eq!(
                policy.resolve(MAX_ITEM_QUANTITY).unwrap(),
                QuantityUpdate::Set(MAX_ITEM_QUANTITY)
            );
        }
    }

    #[test]
    fn test_quantity_floor_per_policy() {
        assert_eq!(
            QuantityPolicy::ClampToOne.resolve(-3).unwrap(),
            QuantityUpdate::Set(1)
        );
        assert_eq!(
            QuantityPolicy::ZeroRemoves.resolve(-3).unwrap(),
            QuantityUpdate::Remove
        );
        assert_eq!(
            QuantityPolicy::Reject.resolve(0),
            Err(CoreError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_quantity_ceiling() {
        assert!(matches!(
            QuantityPolicy::ClampToOne.resolve(MAX_ITEM_QUANTITY + 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_discount_policy() {
        assert_eq!(DiscountPolicy::Clamp.resolve(15).unwrap(), 15);
        assert_eq!(DiscountPolicy::Clamp.resolve(i64::MAX).unwrap(), 100);
        assert_eq!(DiscountPolicy::Reject.resolve(100).unwrap(), 100);
        assert_eq!(
            DiscountPolicy::Reject.resolve(-1),
            Err(CoreError::InvalidDiscount(-1))
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "zero_removes".parse::<QuantityPolicy>().unwrap(),
            QuantityPolicy::ZeroRemoves
        );
        assert_eq!("CLAMP".parse::<DiscountPolicy>().unwrap(), DiscountPolicy::Clamp);
        assert!("sometimes".parse::<QuantityPolicy>().is_err());
    }

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.quantity, QuantityPolicy::ClampToOne);
        assert_eq!(policy.discount, DiscountPolicy::Clamp);
    }
}
