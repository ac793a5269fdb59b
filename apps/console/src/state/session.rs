//! # Session State
//!
//! One cashier session: the open transaction draft plus the catalog and
//! customer directory it looks things up in.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Command                  SessionState            Draft Change          │
//! │  ───────                  ────────────            ────────────          │
//! │                                                                         │
//! │  add_to_cart ───────────► catalog.find() ───────► reduce(AddProduct)    │
//! │                                                                         │
//! │  set_discount ──────────► dispatch() ───────────► reduce(SetDiscount)   │
//! │                                                                         │
//! │  select_customer ───────► customers.find() ─────► reduce(Select...)     │
//! │                                                                         │
//! │  submit_transaction ────► draft.submit() ───────► new empty draft       │
//! │                                                                         │
//! │  NOTE: On any error the draft is left exactly as it was.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands run one at a time on a single thread, so the session is owned
//! directly rather than shared behind a lock.

use storefront_core::{
    reduce, CatalogEntry, CatalogProvider, CoreError, CoreResult, CustomerDirectory,
    CustomerRecord, DraftAction, InMemoryCatalog, InMemoryCustomerDirectory, TransactionDraft,
    TransactionSummary,
};
use tracing::{debug, info};

use super::ConfigState;

/// The open transaction and its lookups.
#[derive(Debug, Clone)]
pub struct SessionState {
    config: ConfigState,
    draft: TransactionDraft,
    catalog: InMemoryCatalog,
    customers: InMemoryCustomerDirectory,
}

impl SessionState {
    /// Starts a session over the demo catalog and customer list.
    pub fn new(config: ConfigState) -> Self {
        SessionState::with_providers(
            config,
            InMemoryCatalog::with_demo_products(),
            InMemoryCustomerDirectory::with_demo_customers(),
        )
    }

    pub fn with_providers(
        config: ConfigState,
        catalog: InMemoryCatalog,
        customers: InMemoryCustomerDirectory,
    ) -> Self {
        info!(
            store = %config.store_name,
            products = catalog.len(),
            customers = customers.len(),
            "Session started"
        );
        SessionState {
            config,
            draft: TransactionDraft::new(),
            catalog,
            customers,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    pub fn customers(&self) -> &InMemoryCustomerDirectory {
        &self.customers
    }

    /// Applies one action under the configured pricing policy.
    ///
    /// The store's line item limit is checked here; the cart itself only
    /// knows the global maximum.
    pub fn dispatch(&mut self, action: DraftAction) -> CoreResult<&TransactionDraft> {
        if matches!(action, DraftAction::AddProduct { .. })
            && self.draft.cart.item_count() >= self.config.max_cart_items
        {
            return Err(CoreError::CartTooLarge {
                max: self.config.max_cart_items,
            });
        }

        self.draft = reduce(&self.draft, action, self.config.pricing)?;
        Ok(&self.draft)
    }

    /// Adds a catalog product by id.
    pub fn add_product(
        &mut self,
        product_id: &str,
        quantity: Option<i64>,
    ) -> CoreResult<&TransactionDraft> {
        let entry = self
            .catalog
            .find(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.dispatch(DraftAction::AddProduct { entry, quantity })
    }

    /// Fills the customer fields from a directory record.
    pub fn select_customer(&mut self, customer_id: &str) -> CoreResult<&TransactionDraft> {
        let customer: CustomerRecord = self
            .customers
            .find(customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;

        self.dispatch(DraftAction::SelectCustomer { customer })
    }

    /// Registers a product created in the add-product form.
    pub fn register_product(&mut self, entry: CatalogEntry) {
        debug!(product_id = %entry.id, name = %entry.name, "Product registered");
        self.catalog.upsert(entry);
    }

    /// Checks whether the draft could be submitted right now.
    pub fn check(&self) -> CoreResult<()> {
        storefront_core::validate_for_checkout(
            &self.draft.cart,
            &self.draft.customer,
            self.config.require_valid_phone,
        )
    }

    /// Submits the draft and starts a fresh one.
    ///
    /// On failure the draft is kept so the cashier can fix it.
    pub fn submit(&mut self) -> CoreResult<TransactionSummary> {
        let summary = self.draft.submit(self.config.require_valid_phone)?;
        info!(
            transaction_id = %summary.id,
            items = summary.items.len(),
            total = %self.config.format_money(summary.totals.total),
            "Transaction submitted"
        );
        self.draft = TransactionDraft::new();
        Ok(summary)
    }

    /// Discards the draft.
    pub fn reset(&mut self) -> &TransactionDraft {
        self.draft = TransactionDraft::new();
        &self.draft
    }
}
