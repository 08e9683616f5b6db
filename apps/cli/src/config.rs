//! # Configuration
//!
//! Price list, tax rate, sales file and admin credential, loaded once at
//! startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SMARTPOS_*`)
//! 2. Config file: `--config <path>`, else `./smartpos.toml`, else the
//!    platform config directory (`~/.config/smartpos/smartpos.toml` on Linux)
//! 3. Defaults (this file): the café's drinks and snacks menu at 5% GST
//!
//! ## File Format
//! ```toml
//! tax_rate = "5"            # percent
//! sales_file = "sales.csv"
//! currency_symbol = "₹"
//! empty_history = "zeroed"  # or "reject"
//!
//! [admin]
//! password_hash = "$argon2id$v=19$..."   # or: password = "..."
//!
//! [menu.drinks]
//! Latte = "120"
//! "Black Coffee" = "90"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use smartpos_core::{EmptyHistoryPolicy, Money, PriceList, TaxRate};

/// File name looked up in the working directory and the config directory.
pub const CONFIG_FILE_NAME: &str = "smartpos.toml";

pub const ENV_SALES_FILE: &str = "SMARTPOS_SALES_FILE";
pub const ENV_TAX_RATE: &str = "SMARTPOS_TAX_RATE";
pub const ENV_ADMIN_PASSWORD: &str = "SMARTPOS_ADMIN_PASSWORD";
pub const ENV_ADMIN_PASSWORD_HASH: &str = "SMARTPOS_ADMIN_PASSWORD_HASH";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("The menu has no items")]
    EmptyMenu,

    #[error("No admin credential configured: set [admin] password_hash or SMARTPOS_ADMIN_PASSWORD_HASH")]
    MissingAdminCredential,
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Config Types
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// GST rate as a percent string, e.g. `"5"` or `"12.5"`.
    pub tax_rate: String,

    /// Append-only transaction file.
    pub sales_file: PathBuf,

    /// Prefix for printed amounts.
    pub currency_symbol: String,

    /// Report behaviour when no transactions match.
    pub empty_history: EmptyHistoryPolicy,

    pub admin: AdminConfig,

    /// Category → item → price string.
    pub menu: BTreeMap<String, BTreeMap<String, String>>,
}

/// Admin credential. A hash takes precedence over a plaintext password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub password: Option<String>,
    /// Argon2 PHC string, as printed by `smartpos hash-password`.
    pub password_hash: Option<String>,
}

impl Default for AppConfig {
    /// The café menu the till shipped with.
    ///
    /// ## Default Values
    /// - Tax: 5% GST
    /// - Sales file: `sales.csv` in the working directory
    /// - Currency: ₹
    /// - Admin: none (reports refuse to run until one is configured)
    fn default() -> Self {
        let drinks = [
            ("Latte", "120"),
            ("Espresso", "100"),
            ("Cappuccino", "130"),
            ("Black Coffee", "90"),
            ("Masala Tea", "60"),
        ];
        let snacks = [
            ("Vada pav", "30"),
            ("Samosa", "25"),
            ("Grilled Sandwich", "70"),
            ("French Fries", "80"),
            ("Chocolate Donut", "60"),
        ];

        let category = |items: &[(&str, &str)]| {
            items
                .iter()
                .map(|(name, price)| (name.to_string(), price.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        let mut menu = BTreeMap::new();
        menu.insert("drinks".to_string(), category(&drinks));
        menu.insert("snacks".to_string(), category(&snacks));

        AppConfig {
            tax_rate: "5".to_string(),
            sales_file: PathBuf::from("sales.csv"),
            currency_symbol: "₹".to_string(),
            empty_history: EmptyHistoryPolicy::default(),
            admin: AdminConfig::default(),
            menu,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads, applies environment overrides, and validates.
    ///
    /// An explicit path must exist; the implicit locations are optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::discover() {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    AppConfig::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses TOML text; missing keys fall back to the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// First implicit config file that exists.
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Some(local);
        }

        ProjectDirs::from("", "", "smartpos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .filter(|path| path.is_file())
    }

    /// Applies `SMARTPOS_*` overrides from `lookup`.
    ///
    /// Setting one admin variable replaces the whole `[admin]` table so a
    /// stale file credential cannot outrank it.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_SALES_FILE) {
            self.sales_file = PathBuf::from(path);
        }

        if let Some(rate) = lookup(ENV_TAX_RATE) {
            self.tax_rate = rate;
        }

        let password = lookup(ENV_ADMIN_PASSWORD);
        let password_hash = lookup(ENV_ADMIN_PASSWORD_HASH);
        if password.is_some() || password_hash.is_some() {
            self.admin = AdminConfig {
                password,
                password_hash,
            };
        }
    }

    /// Checks everything that can be checked without a command.
    ///
    /// The admin credential is checked later, only by commands that need it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tax_rate()?;
        self.price_list()?;

        if self.currency_symbol.contains(&['\n', '\r'][..]) {
            return Err(ConfigError::invalid(
                "currency_symbol",
                "must not contain line breaks",
            ));
        }

        if self.sales_file.as_os_str().is_empty() {
            return Err(ConfigError::invalid("sales_file", "must not be empty"));
        }

        Ok(())
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// The configured GST rate.
    pub fn tax_rate(&self) -> Result<TaxRate, ConfigError> {
        self.tax_rate
            .parse()
            .map_err(|e| ConfigError::invalid("tax_rate", e))
    }

    /// All categories merged into one price list.
    ///
    /// ## Errors
    /// - `EmptyMenu` when no category has items
    /// - `InvalidValue` for an unparsable price, a bad name, or a name that
    ///   appears in two categories
    pub fn price_list(&self) -> Result<PriceList, ConfigError> {
        let mut entries = Vec::new();

        for (category, items) in &self.menu {
            for (name, price) in items {
                let price: Money = price
                    .parse()
                    .map_err(|e| ConfigError::invalid(format!("menu.{}.{}", category, name), e))?;
                entries.push((name.clone(), price));
            }
        }

        if entries.is_empty() {
            return Err(ConfigError::EmptyMenu);
        }

        PriceList::new(entries).map_err(|e| ConfigError::invalid("menu", e))
    }

    /// `"₹189.00"`.
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();

        let prices = config.price_list().unwrap();
        assert_eq!(prices.len(), 10);
        assert_eq!(prices.price_of("Latte"), Some(Money::from_cents(12_000)));
        assert_eq!(prices.price_of("Vada pav"), Some(Money::from_cents(3_000)));
        assert_eq!(config.tax_rate().unwrap(), TaxRate::from_bps(500));
        assert_eq!(config.empty_history, EmptyHistoryPolicy::Zeroed);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            tax_rate = "12.5"
            empty_history = "reject"

            [menu.coffee]
            Coffee = "50"
            Sandwich = "80.00"
            "#,
        )
        .unwrap();

        assert_eq!(config.tax_rate().unwrap(), TaxRate::from_bps(1250));
        assert_eq!(config.empty_history, EmptyHistoryPolicy::Reject);
        assert_eq!(config.sales_file, PathBuf::from("sales.csv"));
        assert_eq!(config.currency_symbol, "₹");

        let prices = config.price_list().unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.price_of("Sandwich"), Some(Money::from_cents(8_000)));
        assert!(!prices.contains("Latte"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(AppConfig::from_toml_str("gst = \"5\"").is_err());
        assert!(AppConfig::from_toml_str("[admin]\nuser = \"root\"").is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let mut config = AppConfig::default();
        config.tax_rate = "five".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "tax_rate"
        ));

        let mut config = AppConfig::default();
        config
            .menu
            .get_mut("drinks")
            .unwrap()
            .insert("Latte".to_string(), "0".to_string());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.menu.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyMenu)));
    }

    #[test]
    fn test_duplicate_item_across_categories() {
        let config = AppConfig::from_toml_str(
            r#"
            [menu.drinks]
            Latte = "120"

            [menu.specials]
            Latte = "99"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.price_list(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_SALES_FILE, "/var/lib/smartpos/sales.csv"),
            (ENV_TAX_RATE, "18"),
            (ENV_ADMIN_PASSWORD, "letmein"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::from_toml_str(
            r#"
            [admin]
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$aGFzaA"
            "#,
        )
        .unwrap();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.sales_file, PathBuf::from("/var/lib/smartpos/sales.csv"));
        assert_eq!(config.tax_rate().unwrap(), TaxRate::from_bps(1800));
        assert_eq!(config.admin.password.as_deref(), Some("letmein"));
        assert_eq!(config.admin.password_hash, None);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "currency_symbol = \"Rs. \"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.format_currency(Money::from_cents(18_900)), "Rs. 189.00");

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));

        fs::write(&path, "tax_rate = [").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
