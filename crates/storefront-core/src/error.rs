//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Cart, checkout and lookup failures             │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  console errors (apps/console)                                         │
//! │  └── ApiError         - What the presentation layer sees (serialized)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → inline message         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable. The UI shows it next to the field or
//! on the checkout button; nothing is retried automatically.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Checkout attempted with no line items.
    #[error("Add at least one product to the transaction")]
    EmptyCart,

    /// Checkout attempted without a customer phone number.
    #[error("Customer phone number is required")]
    MissingCustomerPhone,

    /// Checkout attempted without a customer name.
    #[error("Customer name is required")]
    MissingCustomerName,

    /// Phone number is present but does not match the accepted pattern.
    #[error("Invalid phone number: {0}")]
    InvalidCustomerPhone(String),

    /// Discount outside [0, 100] under the rejecting discount policy.
    #[error("Discount must be between 0 and 100, got {0}")]
    InvalidDiscount(i64),

    /// Quantity below 1 under the rejecting quantity policy, or on add.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// Line item id is not in the cart.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Catalog lookup failed.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer directory lookup failed.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Customer label id is not one of the fixed labels.
    #[error("Unknown customer label: {0}")]
    UnknownLabel(String),

    /// Cart has reached the maximum number of line items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the failures that block the checkout button.
    pub fn is_submission_error(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyCart
                | CoreError::MissingCustomerPhone
                | CoreError::MissingCustomerName
                | CoreError::InvalidCustomerPhone(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., phone number, price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Add at least one product to the transaction"
        );
        assert_eq!(
            CoreError::InvalidDiscount(140).to_string(),
            "Discount must be between 0 and 100, got 140"
        );
        assert_eq!(
            CoreError::QuantityTooLarge {
                requested: 1200,
                max: 999
            }
            .to_string(),
            "Quantity 1200 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: 100_000_000_000,
        };
        assert_eq!(err.to_string(), "price must be between 0 and 100000000000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(!core_err.is_submission_error());
    }

    #[test]
    fn test_submission_errors() {
        assert!(CoreError::EmptyCart.is_submission_error());
        assert!(CoreError::MissingCustomerName.is_submission_error());
        assert!(!CoreError::LineItemNotFound("x".into()).is_submission_error());
    }
}
