//! # Catalog and Customer Providers
//!
//! Read-only lookup interfaces the transaction engine depends on, plus
//! in-memory implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Transaction draft ──► CatalogProvider ──┬── InMemoryCatalog          │
//! │                                           └── (backend client)          │
//! │                                                                         │
//! │   Transaction draft ──► CustomerDirectory ┬── InMemoryCustomerDirectory │
//! │                                           └── (backend client)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine never sees a provider: callers look an entry up and
//! pass the `CatalogEntry` to the cart.

use chrono::NaiveDate;

use crate::money::Money;
use crate::types::{CatalogEntry, CustomerRecord};
use crate::{CUSTOMER_SUGGESTION_MIN_CHARS, PRODUCT_SUGGESTION_MIN_CHARS};

// =============================================================================
// Provider Traits
// =============================================================================

/// Product lookup.
pub trait CatalogProvider {
    /// Returns the entry with this id.
    fn find(&self, id: &str) -> Option<CatalogEntry>;

    /// Returns up to `limit` entries matching `query`. An empty query
    /// matches everything.
    fn search(&self, query: &str, limit: usize) -> Vec<CatalogEntry>;
}

/// Customer lookup.
pub trait CustomerDirectory {
    /// Returns the customer with this id.
    fn find(&self, id: &str) -> Option<CustomerRecord>;

    /// Returns up to `limit` customers whose name or phone matches `query`.
    fn search(&self, query: &str, limit: usize) -> Vec<CustomerRecord>;
}

/// Product suggestions for the search box; empty until the query reaches
/// `PRODUCT_SUGGESTION_MIN_CHARS`.
pub fn product_suggestions<P: CatalogProvider + ?Sized>(
    provider: &P,
    query: &str,
    limit: usize,
) -> Vec<CatalogEntry> {
    if query.trim().chars().count() < PRODUCT_SUGGESTION_MIN_CHARS {
        return Vec::new();
    }
    provider.search(query, limit)
}

/// Customer suggestions under the phone field; empty until the input
/// reaches `CUSTOMER_SUGGESTION_MIN_CHARS`.
pub fn customer_suggestions<D: CustomerDirectory + ?Sized>(
    directory: &D,
    phone_input: &str,
    limit: usize,
) -> Vec<CustomerRecord> {
    if phone_input.trim().chars().count() < CUSTOMER_SUGGESTION_MIN_CHARS {
        return Vec::new();
    }
    directory.search(phone_input, limit)
}

// =============================================================================
// In-Memory Catalog
// =============================================================================

/// Catalog backed by a `Vec`, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl InMemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        InMemoryCatalog { entries }
    }

    /// The two demo toys from the product suggestions list.
    pub fn with_demo_products() -> Self {
        InMemoryCatalog::new(vec![
            CatalogEntry::new(
                "1",
                "Classic Wooden Building Blocks",
                Money::from_rupees(1299),
            )
            .with_mrp(Money::from_rupees(1499)),
            CatalogEntry::new("2", "Educational Science Kit", Money::from_rupees(2499))
                .with_mrp(Money::from_rupees(2999)),
        ])
    }

    /// Adds or replaces an entry by id.
    pub fn upsert(&mut self, entry: CatalogEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn find(&self, id: &str) -> Option<CatalogEntry> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    fn search(&self, query: &str, limit: usize) -> Vec<CatalogEntry> {
        let needle = query.trim().to_lowercase();

        self.entries
            .iter()
            .filter(|e| {
                needle.is_empty()
                    || e.name.to_lowercase().contains(&needle)
                    || e.sku
                        .as_deref()
                        .is_some_and(|sku| sku.to_lowercase().contains(&needle))
            })
            .take(limit)
            .cloned()
            .collect()
    }
}

// =============================================================================
// In-Memory Customer Directory
// =============================================================================

/// Customer directory backed by a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDirectory {
    customers: Vec<CustomerRecord>,
}

impl InMemoryCustomerDirectory {
    pub fn new(customers: Vec<CustomerRecord>) -> Self {
        InMemoryCustomerDirectory { customers }
    }

    /// The demo customers from the customers tab.
    pub fn with_demo_customers() -> Self {
        let record = |id: &str, name: &str, phone: &str, date: (i32, u32, u32), spent: i64| {
            CustomerRecord {
                id: id.to_string(),
                name: name.to_string(),
                phone: phone.to_string(),
                last_purchase: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
                total_spent: Money::from_rupees(spent),
            }
        };

        InMemoryCustomerDirectory::new(vec![
            record("1", "Rahul Sharma", "+91 98765 43210", (2024, 2, 15), 12_500),
            record("2", "Priya Patel", "+91 87654 32109", (2024, 2, 10), 8_750),
            record("3", "Amit Kumar", "+91 76543 21098", (2024, 2, 5), 15_000),
        ])
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn find(&self, id: &str) -> Option<CustomerRecord> {
        self.customers.iter().find(|c| c.id == id).cloned()
    }

    fn search(&self, query: &str, limit: usize) -> Vec<CustomerRecord> {
        let needle = query.trim().to_lowercase();
        let needle_digits = digits(&needle);

        self.customers
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.phone.contains(&needle)
                    || (!needle_digits.is_empty() && digits(&c.phone).contains(&needle_digits))
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
