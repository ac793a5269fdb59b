//! # Product Commands
//!
//! Product search for the transaction screen and the add-product form.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  Cashier types "bl"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  search_products { query: "bl" }                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  Query too long?  ──► ValidationError     │                         │
//! │  │  Under 2 chars?   ──► []                  │                         │
//! │  │  Otherwise        ──► name / SKU match    │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<CatalogEntry>, then add_to_cart { productId }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::validation::validate_search_query;
use storefront_core::{product_suggestions, CatalogEntry, CoreError, ProductForm};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::SessionState;

/// Searches the catalog by name or SKU.
///
/// ## Arguments
/// * `query` - Search text; fewer than 2 characters returns nothing
/// * `limit` - Maximum results (default: configured suggestion limit)
pub fn search_products(
    session: &SessionState,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<CatalogEntry>, ApiError> {
    let query = validate_search_query(query).map_err(CoreError::from)?;
    let limit = limit.unwrap_or(session.config().suggestion_limit);
    debug!(query = %query, limit = %limit, "search_products command");

    Ok(product_suggestions(session.catalog(), &query, limit))
}

/// Validates the add-product form and registers the product.
///
/// On failure every failing field is reported in `error.fields`.
pub fn create_product(
    session: &mut SessionState,
    form: &ProductForm,
) -> Result<CatalogEntry, ApiError> {
    debug!(name = %form.name, "create_product command");
    let entry = form.validate().map_err(ApiError::form)?;

    info!(product_id = %entry.id, sku = ?entry.sku, "Product created");
    session.register_product(entry.clone());
    Ok(entry)
}
