//! # Configuration State
//!
//! Store and pricing settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_QUANTITY_POLICY=reject                                  │
//! │     STOREFRONT_REQUIRE_VALID_PHONE=true                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/storefront/console.toml (Linux)                          │
//! │     ~/Library/Application Support/in.storefront.storefront/... (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     INR, clamp quantities to 1, clamp discounts to [0, 100]            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Little Steps Kids Store"
//! currency_code = "INR"
//! currency_symbol = "₹"
//! require_valid_phone = true
//! max_cart_items = 50
//!
//! [pricing]
//! quantity = "zero_removes"  # clamp_to_one | zero_removes | reject
//! discount = "clamp"         # clamp | reject
//! ```
//!
//! Configuration is read-only after loading, so the session holds it by
//! value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::{DiscountPolicy, Money, PricingPolicy, QuantityPolicy, MAX_CART_ITEMS};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Store name shown on the transaction summary.
    pub store_name: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol for display.
    pub currency_symbol: String,

    /// Check the phone pattern at checkout, not just presence.
    pub require_valid_phone: bool,

    /// Line item limit for this store; at most `MAX_CART_ITEMS`.
    pub max_cart_items: usize,

    /// How many suggestions the search boxes show.
    pub suggestion_limit: usize,

    /// How out-of-range quantities and discounts are handled.
    pub pricing: PricingPolicy,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            require_valid_phone: false,
            max_cart_items: MAX_CART_ITEMS,
            suggestion_limit: 5,
            pricing: PricingPolicy::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` if given (must exist), otherwise the
    ///    platform config dir (skipped when absent)
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.max_cart_items == 0 || self.max_cart_items > MAX_CART_ITEMS {
            return Err(ConfigError::Invalid(format!(
                "max_cart_items must be between 1 and {}, got {}",
                MAX_CART_ITEMS, self.max_cart_items
            )));
        }

        if self.suggestion_limit == 0 {
            return Err(ConfigError::Invalid(
                "suggestion_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(code) = lookup("STOREFRONT_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(policy) = lookup("STOREFRONT_QUANTITY_POLICY") {
            match policy.parse::<QuantityPolicy>() {
                Ok(policy) => self.pricing.quantity = policy,
                Err(e) => warn!(error = %e, "Ignoring STOREFRONT_QUANTITY_POLICY"),
            }
        }

        if let Some(policy) = lookup("STOREFRONT_DISCOUNT_POLICY") {
            match policy.parse::<DiscountPolicy>() {
                Ok(policy) => self.pricing.discount = policy,
                Err(e) => warn!(error = %e, "Ignoring STOREFRONT_DISCOUNT_POLICY"),
            }
        }

        if let Some(flag) = lookup("STOREFRONT_REQUIRE_VALID_PHONE") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.require_valid_phone = true,
                "0" | "false" | "no" => self.require_valid_phone = false,
                _ => warn!(value = %flag, "Ignoring STOREFRONT_REQUIRE_VALID_PHONE"),
            }
        }

        if let Some(max) = lookup("STOREFRONT_MAX_CART_ITEMS") {
            match max.parse::<usize>() {
                Ok(max) => self.max_cart_items = max,
                Err(_) => warn!(value = %max, "Ignoring STOREFRONT_MAX_CART_ITEMS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("console.toml"))
    }

    /// Formats an amount with the configured symbol and Indian digit
    /// grouping.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_console::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_paise(12_345_678)), "₹1,23,456.78");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.quantity, QuantityPolicy::ClampToOne);
        assert_eq!(config.pricing.discount, DiscountPolicy::Clamp);
        assert!(!config.require_valid_phone);
    }

    #[test]
    fn test_format_money() {
        let config = ConfigState::default();
        assert_eq!(config.format_money(Money::from_rupees(1299)), "₹1,299.00");
        assert_eq!(config.format_money(Money::from_paise(5)), "₹0.05");
        assert_eq!(config.format_money(Money::from_paise(-550)), "-₹5.50");
        assert_eq!(
            config.format_money(Money::from_rupees(1_00_00_000)),
            "₹1,00,00,000.00"
        );
    }

    #[test]
    fn test_format_money_custom_symbol() {
        let config = ConfigState {
            currency_symbol: "Rs. ".into(),
            ..ConfigState::default()
        };
        assert_eq!(config.format_money(Money::from_rupees(2499)), "Rs. 2,499.00");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
store_name = "Little Steps"
max_cart_items = 10

[pricing]
quantity = "zero_removes"
"#
        )
        .unwrap();

        let config = ConfigState::from_file(file.path()).unwrap();

        assert_eq!(config.store_name, "Little Steps");
        assert_eq!(config.max_cart_items, 10);
        assert_eq!(config.pricing.quantity, QuantityPolicy::ZeroRemoves);
        assert_eq!(config.pricing.discount, DiscountPolicy::Clamp);
        assert_eq!(config.currency_code, "INR");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        assert!(matches!(
            ConfigState::load(Some(&path)),
            Err(ConfigError::NotFound(_))
        ));
        assert_eq!(ConfigState::load_or_default(Some(&path)), ConfigState::default());
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_cart_items = \"lots\"").unwrap();

        assert!(matches!(
            ConfigState::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation() {
        let config = ConfigState {
            max_cart_items: MAX_CART_ITEMS + 1,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ConfigState {
            store_name: "  ".into(),
            ..ConfigState::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("STOREFRONT_STORE_NAME", "Kids Corner"),
            ("STOREFRONT_QUANTITY_POLICY", "reject"),
            ("STOREFRONT_DISCOUNT_POLICY", "reject"),
            ("STOREFRONT_REQUIRE_VALID_PHONE", "yes"),
            ("STOREFRONT_MAX_CART_ITEMS", "20"),
        ]));

        assert_eq!(config.store_name, "Kids Corner");
        assert_eq!(config.pricing.quantity, QuantityPolicy::Reject);
        assert_eq!(config.pricing.discount, DiscountPolicy::Reject);
        assert!(config.require_valid_phone);
        assert_eq!(config.max_cart_items, 20);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("STOREFRONT_QUANTITY_POLICY", "sometimes"),
            ("STOREFRONT_REQUIRE_VALID_PHONE", "maybe"),
            ("STOREFRONT_MAX_CART_ITEMS", "-1"),
        ]));

        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConfigState::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigState = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
