//! # Validation Module
//!
//! Input validation for the transaction screen and the product form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Keystroke coercion                                           │
//! │  ├── parse_discount_input: "abc" → 0                                   │
//! │  └── Policies clamp or reject out-of-range numbers (policy.rs)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field validators (THIS MODULE)                               │
//! │  ├── Phone pattern, search query, unit price, price text               │
//! │  └── Return ValidationError with the field name                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout gate                                                │
//! │  └── validate_for_submission: EmptyCart → phone → name                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_phone_number, validate_unit_price};
//! use storefront_core::{Money, MAX_UNIT_PRICE};
//!
//! assert_eq!(validate_phone_number("+91 98765 43210").unwrap(), "9876543210");
//! assert!(validate_unit_price(MAX_UNIT_PRICE).is_ok());
//! assert!(validate_unit_price(MAX_UNIT_PRICE + Money::from_paise(1)).is_err());
//! ```

use crate::cart::Cart;
use crate::customer::CustomerDraft;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::MAX_UNIT_PRICE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a search query.
const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// Phone Numbers
// =============================================================================

/// Strips formatting from a phone number.
///
/// Removes spaces, dashes, dots and parentheses, then drops a leading
/// `+91`/`91` country code from 12-digit numbers and a leading trunk `0`
/// from 11-digit numbers.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::normalize_phone;
///
/// assert_eq!(normalize_phone("+91 98765 43210"), "9876543210");
/// assert_eq!(normalize_phone("098765-43210"), "9876543210");
/// assert_eq!(normalize_phone("98765"), "98765");
/// ```
pub fn normalize_phone(input: &str) -> String {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if cleaned.len() == 12 && cleaned.starts_with("91") {
        return cleaned[2..].to_string();
    }
    if cleaned.len() == 11 && cleaned.starts_with('0') {
        return cleaned[1..].to_string();
    }

    cleaned.to_string()
}

/// Validates an Indian mobile number.
///
/// ## Rules
/// - Must not be empty
/// - After [`normalize_phone`], must be 10 digits starting with 6-9
///
/// ## Returns
/// The normalized 10-digit number.
pub fn validate_phone_number(input: &str) -> ValidationResult<String> {
    if input.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let number = normalize_phone(input);
    let bytes = number.as_bytes();
    let valid = bytes.len() == 10
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit);

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be a 10-digit mobile number starting with 6-9".to_string(),
        });
    }

    Ok(number)
}

// =============================================================================
// Search
// =============================================================================

/// Validates a search query.
///
/// Can be empty; returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Prices
// =============================================================================

/// Validates a unit price.
///
/// Zero is allowed (free items); the ceiling is [`MAX_UNIT_PRICE`].
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.paise(),
        });
    }

    Ok(())
}

// =============================================================================
// Input Coercion
// =============================================================================

/// Coerces raw discount text to a number.
///
/// Whole numbers parse as-is, decimals are truncated toward zero, and
/// anything else (including empty input) becomes 0. Range handling is left
/// to [`DiscountPolicy`](crate::policy::DiscountPolicy).
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_discount_input;
///
/// assert_eq!(parse_discount_input("15"), 15);
/// assert_eq!(parse_discount_input(" 12.9 "), 12);
/// assert_eq!(parse_discount_input(""), 0);
/// assert_eq!(parse_discount_input("ten"), 0);
/// assert_eq!(parse_discount_input("150"), 150);
/// ```
pub fn parse_discount_input(text: &str) -> i64 {
    let text = text.trim();

    if let Ok(value) = text.parse::<i64>() {
        return value;
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

/// Parses a rupee amount typed into a price field.
///
/// Accepts whole rupees (`"1299"`) or up to two decimal places
/// (`"1299.5"`, `"1299.50"`). Commas used as digit separators are ignored.
/// Amounts above [`MAX_UNIT_PRICE`] are out of range.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::parse_price_input;
///
/// assert_eq!(parse_price_input("mrp", "1,499").unwrap().paise(), 149_900);
/// assert_eq!(parse_price_input("mrp", "99.5").unwrap().paise(), 9_950);
/// assert!(parse_price_input("mrp", "12.345").is_err());
/// ```
pub fn parse_price_input(field: &str, text: &str) -> ValidationResult<Money> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be an amount in rupees".to_string(),
    };

    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
        || fraction.len() > 2
    {
        return Err(invalid());
    }

    let rupees: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let paise: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => fraction.parse().map_err(|_| invalid())?,
    };

    let amount = rupees
        .checked_mul(100)
        .and_then(|p| p.checked_add(paise))
        .map(Money::from_paise)
        .ok_or_else(invalid)?;

    if amount > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.paise(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Checkout Gate
// =============================================================================

/// Checks the preconditions for submitting a transaction.
///
/// ## Rules (first failure wins)
/// 1. Cart must have at least one line item → `EmptyCart`
/// 2. Phone must not be blank → `MissingCustomerPhone`
/// 3. Name must not be blank → `MissingCustomerName`
///
/// ## Example
/// ```rust
/// use storefront_core::{Cart, CatalogEntry, CustomerDraft, Money};
/// use storefront_core::validation::validate_for_submission;
///
/// let mut cart = Cart::new();
/// let customer = CustomerDraft::new("9876543210", "Rahul");
/// assert!(validate_for_submission(&cart, &customer).is_err());
///
/// cart.add_item(&CatalogEntry::new("1", "Blocks", Money::from_paise(1299)), 1).unwrap();
/// assert!(validate_for_submission(&cart, &customer).is_ok());
/// ```
pub fn validate_for_submission(cart: &Cart, customer: &CustomerDraft) -> CoreResult<()> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    if customer.phone.trim().is_empty() {
        return Err(CoreError::MissingCustomerPhone);
    }

    if customer.name.trim().is_empty() {
        return Err(CoreError::MissingCustomerName);
    }

    Ok(())
}

/// [`validate_for_submission`] plus, when `require_valid_phone` is set, the
/// phone pattern check.
pub fn validate_for_checkout(
    cart: &Cart,
    customer: &CustomerDraft,
    require_valid_phone: bool,
) -> CoreResult<()> {
    validate_for_submission(cart, customer)?;

    if require_valid_phone {
        validate_phone_number(&customer.phone)
            .map_err(|_| CoreError::InvalidCustomerPhone(customer.phone.clone()))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogEntry;

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&CatalogEntry::new("1", "Blocks", Money::from_paise(1299)), 1)
            .unwrap();
        cart
    }

    #[test]
    fn test_validate_phone_number() {
        assert_eq!(validate_phone_number("9876543210").unwrap(), "9876543210");
        assert_eq!(validate_phone_number("+91 87654 32109").unwrap(), "8765432109");
        assert_eq!(validate_phone_number("919876543210").unwrap(), "9876543210");

        assert!(matches!(
            validate_phone_number("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_phone_number("5876543210").is_err()); // starts with 5
        assert!(validate_phone_number("98765").is_err());
        assert!(validate_phone_number("98765abcde").is_err());
        assert!(validate_phone_number("98765432101").is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_paise(1299)).is_ok());
        assert!(validate_unit_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_unit_price(Money::from_paise(-1)).is_err());
        assert!(matches!(
            validate_unit_price(MAX_UNIT_PRICE + Money::from_paise(1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_discount_input() {
        assert_eq!(parse_discount_input("-5"), -5);
        assert_eq!(parse_discount_input("1e2"), 100);
        assert_eq!(parse_discount_input("NaN"), 0);
        assert_eq!(parse_discount_input("inf"), 0);
    }

    #[test]
    fn test_parse_price_input() {
        assert_eq!(parse_price_input("mrp", "1299").unwrap().paise(), 129_900);
        assert_eq!(parse_price_input("mrp", ".5").unwrap().paise(), 50);
        assert!(matches!(
            parse_price_input("mrp", " "),
            Err(ValidationError::Required { .. })
        ));
        assert!(parse_price_input("mrp", "-10").is_err());
        assert!(parse_price_input("mrp", "12a").is_err());
        assert!(parse_price_input("mrp", ".").is_err());
    }

    #[test]
    fn test_parse_price_input_ceiling() {
        assert_eq!(
            parse_price_input("mrp", "1,00,00,00,000").unwrap(),
            MAX_UNIT_PRICE
        );
        assert!(matches!(
            parse_price_input("mrp", "1000000000.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_price_input("mrp", "90000000000000000"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(parse_price_input("mrp", "99999999999999999999").is_err());
    }

    #[test]
    fn test_empty_cart_wins_regardless_of_customer() {
        let cart = Cart::new();
        assert_eq!(
            validate_for_submission(&cart, &CustomerDraft::default()),
            Err(CoreError::EmptyCart)
        );
        assert_eq!(
            validate_for_submission(&cart, &CustomerDraft::new("9876543210", "Rahul")),
            Err(CoreError::EmptyCart)
        );
    }

    #[test]
    fn test_missing_customer_fields() {
        let cart = cart_with_one_item();
        assert_eq!(
            validate_for_submission(&cart, &CustomerDraft::new("", "Rahul")),
            Err(CoreError::MissingCustomerPhone)
        );
        assert_eq!(
            validate_for_submission(&cart, &CustomerDraft::new("9876543210", "  ")),
            Err(CoreError::MissingCustomerName)
        );
    }

    #[test]
    fn test_submission_succeeds() {
        let cart = cart_with_one_item();
        let customer = CustomerDraft::new("9876543210", "Rahul");
        assert!(validate_for_submission(&cart, &customer).is_ok());
    }

    #[test]
    fn test_checkout_phone_pattern() {
        let cart = cart_with_one_item();
        let customer = CustomerDraft::new("12345", "Rahul");

        assert!(validate_for_checkout(&cart, &customer, false).is_ok());
        assert_eq!(
            validate_for_checkout(&cart, &customer, true),
            Err(CoreError::InvalidCustomerPhone("12345".to_string()))
        );
    }
}
