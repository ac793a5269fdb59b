//! # Customer Draft
//!
//! The customer half of the transaction form: phone, name, labels and the
//! optional "more details" sheet. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{CustomerLabel, CustomerRecord};
use crate::CUSTOMER_SUGGESTION_MIN_CHARS;

/// Optional details captured in the customer details sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDetails {
    /// Child's birthdate as typed by the cashier.
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CustomerDetails {
    /// Drops blank fields so "" and absent mean the same thing.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        CustomerDetails {
            birthdate: keep(self.birthdate),
            email: keep(self.email),
            address: keep(self.address),
        }
    }
}

/// Customer fields of an in-progress transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerDraft {
    /// Phone as typed; validated only at checkout.
    pub phone: String,
    pub name: String,
    /// Selected labels in the order they were toggled on. No duplicates.
    #[serde(default)]
    pub labels: Vec<CustomerLabel>,
    #[serde(default)]
    pub details: CustomerDetails,
}

impl CustomerDraft {
    pub fn new(phone: impl Into<String>, name: impl Into<String>) -> Self {
        CustomerDraft {
            phone: phone.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fills phone and name from a directory record.
    pub fn select(&mut self, record: &CustomerRecord) {
        self.phone = record.phone.clone();
        self.name = record.name.clone();
    }

    /// Adds the label if absent, removes it if present.
    ///
    /// ## Returns
    /// `true` if the label is selected afterwards.
    pub fn toggle_label(&mut self, label: CustomerLabel) -> bool {
        if let Some(index) = self.labels.iter().position(|l| *l == label) {
            self.labels.remove(index);
            false
        } else {
            self.labels.push(label);
            true
        }
    }

    pub fn has_label(&self, label: CustomerLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Whether the phone input is long enough to offer suggestions.
    pub fn wants_suggestions(&self) -> bool {
        self.phone.trim().chars().count() >= CUSTOMER_SUGGESTION_MIN_CHARS
    }
}
