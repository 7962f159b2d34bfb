//! Startup configuration
//!
//! Credentials and the REST endpoint come from the environment (a `.env`
//! file is loaded first by the binary). Strategy parameters are fixed.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::strategy::RsiMode;

/// Pairs watched for the whole process lifetime, processed in this order
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "BCHUSDT", "LTCUSDT", "DOGEUSDT", "DOTUSDT", "ADAUSDT", "BNBUSDT",
];

pub const CANDLE_INTERVAL: &str = "15m";
pub const TICK_PERIOD: Duration = Duration::from_secs(10);
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);
/// Quote-currency amount spent on every market buy
pub const BUY_QUOTE_AMOUNT: Decimal = dec!(15);

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// API key pair used to sign account requests
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Raw shape of the `BINANCE_*` environment variables
#[derive(Debug, Deserialize)]
struct EnvSettings {
    api_key: String,
    secret_key: String,
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Exchange connection settings
#[derive(Debug, Clone)]
pub struct ExchangeSettings {
    pub credentials: Credentials,
    pub base_url: String,
}

impl ExchangeSettings {
    /// Load from `BINANCE_API_KEY`, `BINANCE_SECRET_KEY` and optional `BINANCE_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let source = ::config::Environment::with_prefix("BINANCE").try_parsing(false);
        Self::from_source(source)
    }

    fn from_source(source: ::config::Environment) -> Result<Self> {
        let raw: EnvSettings = ::config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to read exchange settings")?
            .try_deserialize()
            .context("BINANCE_API_KEY and BINANCE_SECRET_KEY must be set")?;

        Ok(Self {
            credentials: Credentials::new(raw.api_key, raw.secret_key),
            base_url: raw.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Fixed parameters of the monitor loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub symbols: Vec<String>,
    pub interval: String,
    pub tick_period: Duration,
    pub call_timeout: Duration,
    pub buy_quote_amount: Decimal,
    pub rsi_mode: RsiMode,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            interval: CANDLE_INTERVAL.to_string(),
            tick_period: TICK_PERIOD,
            call_timeout: CALL_TIMEOUT,
            buy_quote_amount: BUY_QUOTE_AMOUNT,
            rsi_mode: RsiMode::Informational,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_source(vars: &[(&str, &str)]) -> ::config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ::config::Environment::with_prefix("BINANCE")
            .try_parsing(false)
            .source(Some(map))
    }

    #[test]
    fn test_settings_from_env() {
        let settings = ExchangeSettings::from_source(env_source(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.credentials.api_key, "key");
        assert_eq!(settings.credentials.secret_key, "secret");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let settings = ExchangeSettings::from_source(env_source(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "secret"),
            ("BINANCE_BASE_URL", "https://testnet.binance.vision/"),
        ]))
        .unwrap();

        assert_eq!(settings.base_url, "https://testnet.binance.vision");
    }

    #[test]
    fn test_missing_secret_fails() {
        let result = ExchangeSettings::from_source(env_source(&[("BINANCE_API_KEY", "key")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("key", "very-secret");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("key"));
        assert!(!printed.contains("very-secret"));
    }

    #[test]
    fn test_monitor_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.symbols.len(), 8);
        assert_eq!(config.symbols[0], "BTCUSDT");
        assert_eq!(config.interval, "15m");
        assert_eq!(config.tick_period, Duration::from_secs(10));
        assert_eq!(config.buy_quote_amount, dec!(15));
    }
}
