//! # Product Form
//!
//! Validation for the "add product" form. A valid form becomes a
//! `CatalogEntry` that can be offered in the transaction screen.
//!
//! Unlike the cart, the form collects every failing field at once so the
//! UI can mark them all in one pass.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CatalogEntry;
use crate::validation::parse_price_input;
use crate::MAX_UNIT_PRICE;

/// Categories offered in the category picker.
pub const CATEGORIES: &[&str] = &[
    "Toys",
    "Clothing",
    "Books",
    "School Supplies",
    "Electronics",
    "Sports Equipment",
    "Arts & Crafts",
    "Baby Care",
    "Accessories",
    "Other",
];

/// Age groups offered in the age picker.
pub const AGE_GROUPS: &[&str] = &[
    "0-1 years",
    "1-2 years",
    "2-4 years",
    "9-12 years",
    "12+ years",
];

pub const GENDERS: &[&str] = &["Male", "Female", "Unisex", "All"];

/// Minimum description length in characters.
pub const MIN_DESCRIPTION_LEN: usize = 100;

/// Field name → message, ordered by field name.
pub type FormErrors = BTreeMap<String, String>;

/// Raw text of the add-product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub sku: String,
    /// Rupees, as typed.
    pub mrp: String,
    /// Rupees, as typed; optional.
    pub discounted_price: String,
    pub age_group: String,
    pub gender: String,
    pub description: String,
}

impl ProductForm {
    /// Validates every field.
    ///
    /// ## Returns
    /// A catalog entry priced at the discounted price if given, otherwise
    /// the MRP. On failure, one message per failing field.
    pub fn validate(&self) -> Result<CatalogEntry, FormErrors> {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Product name is required".into());
        }

        check_choice(&mut errors, "category", &self.category, CATEGORIES, "Please select a category");

        if self.sku.trim().is_empty() {
            errors.insert("sku".into(), "SKU ID is required".into());
        }

        let mrp = match parse_price_input("mrp", &self.mrp) {
            Ok(mrp) if mrp.is_positive() => Some(mrp),
            Err(ValidationError::Required { .. }) => {
                errors.insert("mrp".into(), "MRP is required".into());
                None
            }
            Err(ValidationError::OutOfRange { .. }) => {
                errors.insert("mrp".into(), format!("MRP cannot exceed {}", MAX_UNIT_PRICE));
                None
            }
            _ => {
                errors.insert("mrp".into(), "Please enter a valid price".into());
                None
            }
        };

        let discounted = if self.discounted_price.trim().is_empty() {
            None
        } else {
            match parse_price_input("discountedPrice", &self.discounted_price) {
                Ok(price) if price.is_positive() => Some(price),
                _ => {
                    errors.insert(
                        "discountedPrice".into(),
                        "Please enter a valid discounted price".into(),
                    );
                    None
                }
            }
        };

        check_choice(&mut errors, "ageGroup", &self.age_group, AGE_GROUPS, "Please select an age group");
        check_choice(&mut errors, "gender", &self.gender, GENDERS, "Please select a gender");

        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            errors.insert(
                "description".into(),
                format!("Description must be at least {} characters", MIN_DESCRIPTION_LEN),
            );
        }

        match (mrp, errors.is_empty()) {
            (Some(mrp), true) => Ok(self.to_entry(mrp, discounted)),
            _ => Err(errors),
        }
    }

    fn to_entry(&self, mrp: Money, discounted: Option<Money>) -> CatalogEntry {
        CatalogEntry {
            id: Uuid::new_v4().to_string(),
            sku: Some(self.sku.trim().to_string()),
            name: self.name.trim().to_string(),
            unit_price: discounted.unwrap_or(mrp),
            mrp: Some(mrp),
            category: Some(self.category.clone()),
        }
    }
}

fn check_choice(errors: &mut FormErrors, field: &str, value: &str, allowed: &[&str], message: &str) {
    if !allowed.contains(&value) {
        errors.insert(field.to_string(), message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Wooden Train Set".into(),
            category: "Toys".into(),
            sku: "TOY-TRAIN-01".into(),
            mrp: "1,499".into(),
            discounted_price: "1299".into(),
            age_group: "2-4 years".into(),
            gender: "Unisex".into(),
            description: "A".repeat(MIN_DESCRIPTION_LEN),
        }
    }

    #[test]
    fn test_valid_form_becomes_entry() {
        let entry = valid_form().validate().unwrap();

        assert_eq!(entry.name, "Wooden Train Set");
        assert_eq!(entry.unit_price, Money::from_rupees(1299));
        assert_eq!(entry.mrp, Some(Money::from_rupees(1499)));
        assert_eq!(entry.sku.as_deref(), Some("TOY-TRAIN-01"));
        assert_eq!(entry.category.as_deref(), Some("Toys"));
    }

    #[test]
    fn test_price_falls_back_to_mrp() {
        let form = ProductForm {
            discounted_price: "  ".into(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().unit_price, Money::from_rupees(1499));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ProductForm::default().validate().unwrap_err();

        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec!["ageGroup", "category", "description", "gender", "mrp", "name", "sku"]
        );
        assert_eq!(errors["mrp"], "MRP is required");
    }

    #[test]
    fn test_price_errors() {
        let form = ProductForm {
            mrp: "0".into(),
            discounted_price: "free".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(errors["mrp"], "Please enter a valid price");
        assert_eq!(errors["discountedPrice"], "Please enter a valid discounted price");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_mrp_ceiling() {
        let form = ProductForm {
            mrp: "90000000000000000".into(),
            discounted_price: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["mrp"], "MRP cannot exceed ₹1,00,00,00,000.00");

        let form = ProductForm {
            mrp: "1000000000".into(),
            discounted_price: String::new(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().unit_price, MAX_UNIT_PRICE);
    }

    #[test]
    fn test_short_description() {
        let form = ProductForm {
            description: "Too short".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors["description"],
            "Description must be at least 100 characters"
        );
    }

    #[test]
    fn test_unknown_category() {
        let form = ProductForm {
            category: "Groceries".into(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().contains_key("category"));
    }
}
