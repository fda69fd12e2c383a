//! Configuration

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{pricing::currency_from_code, wishlist::WISHLIST_KEY};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Currency code is not one of the supported currencies
    #[error("unsupported currency: {0}")]
    UnknownCurrency(String),

    /// Configured currency differs from the currency catalog prices are in
    #[error("configured currency {configured} does not match catalog currency {catalog}")]
    CurrencyMismatch {
        /// Configured currency code
        configured: String,

        /// Catalog currency code
        catalog: String,
    },
}

/// Store configuration, read from CLI arguments or the environment
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// ISO code of the currency prices are shown in (GBP, USD or EUR)
    #[arg(long, env = "TOTE_CURRENCY", default_value = "USD")]
    pub currency: String,

    /// Storage key the wishlist is saved under
    #[arg(long, env = "TOTE_WISHLIST_KEY", default_value = WISHLIST_KEY)]
    pub wishlist_key: String,

    /// Directory for persisted state
    #[arg(long, env = "TOTE_DATA_DIR", default_value = ".tote")]
    pub data_dir: PathBuf,

    /// Fixture base path
    #[arg(long, env = "TOTE_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Catalog fixture name
    #[arg(long, env = "TOTE_CATALOG", default_value = "demo")]
    pub catalog: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl StoreConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        currency_from_code(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }

    /// Resolve the configured currency and check it against the currency the
    /// catalog prices are expressed in. A catalog without a currency accepts
    /// any configured one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for unsupported codes and
    /// [`ConfigError::CurrencyMismatch`] when the two currencies differ.
    pub fn currency_for_catalog(
        &self,
        catalog: Option<&'static Currency>,
    ) -> Result<&'static Currency, ConfigError> {
        let currency = self.currency()?;

        match catalog {
            Some(catalog) if catalog != currency => Err(ConfigError::CurrencyMismatch {
                configured: currency.iso_alpha_code.to_string(),
                catalog: catalog.iso_alpha_code.to_string(),
            }),
            _ => Ok(currency),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            wishlist_key: WISHLIST_KEY.to_string(),
            data_dir: PathBuf::from(".tote"),
            fixtures: PathBuf::from("./fixtures"),
            catalog: "demo".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rusty_money::iso::{EUR, GBP, USD};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        config: StoreConfig,
    }

    #[test]
    fn arguments_override_defaults() -> TestResult {
        let cli = Cli::try_parse_from([
            "tote",
            "--currency",
            "eur",
            "--wishlist-key",
            "favourites",
            "--data-dir",
            "/tmp/tote",
        ])?;

        assert_eq!(cli.config.currency()?, EUR);
        assert_eq!(cli.config.wishlist_key, "favourites");
        assert_eq!(cli.config.data_dir, PathBuf::from("/tmp/tote"));

        Ok(())
    }

    #[test]
    fn default_currency_is_usd() -> TestResult {
        assert_eq!(StoreConfig::default().currency()?, USD);
        assert_eq!(StoreConfig::default().wishlist_key, WISHLIST_KEY);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let config = StoreConfig {
            currency: "XYZ".to_string(),
            ..StoreConfig::default()
        };

        assert!(matches!(config.currency(), Err(ConfigError::UnknownCurrency(code)) if code == "XYZ"));
    }

    #[test]
    fn catalog_currency_must_match_configured_currency() -> TestResult {
        let config = StoreConfig {
            currency: "GBP".to_string(),
            ..StoreConfig::default()
        };

        assert!(matches!(
            config.currency_for_catalog(Some(USD)),
            Err(ConfigError::CurrencyMismatch { configured, catalog })
                if configured == "GBP" && catalog == "USD"
        ));
        assert_eq!(config.currency_for_catalog(Some(GBP))?, GBP);
        assert_eq!(config.currency_for_catalog(None)?, GBP);

        Ok(())
    }
}
