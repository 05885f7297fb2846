use crate::{Error, Result};

const DEFAULT_SCREENER_CONFIG_PATH: &str = "config/screener.toml";
const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Process configuration loaded from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the screener TOML file (symbols, lookback, indicator params).
    pub screener_config_path: String,

    // Market data
    pub market_data_base_url: String,
    /// When set, closes are read from this JSON file instead of the network.
    pub market_data_file: Option<String>,

    // Output
    pub report_format: ReportFormat,
}

/// How the binary renders the batch report on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Config(format!(
                "REPORT_FORMAT must be 'text' or 'json', got: '{other}'"
            ))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let report_format = match lookup("REPORT_FORMAT") {
            Some(v) => v.parse()?,
            None => ReportFormat::default(),
        };

        let market_data_base_url = lookup("MARKET_DATA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_MARKET_DATA_BASE_URL.to_string());
        if market_data_base_url.trim().is_empty() {
            return Err(Error::Config("MARKET_DATA_BASE_URL is empty".into()));
        }

        Ok(Config {
            screener_config_path: lookup("SCREENER_CONFIG_PATH")
                .unwrap_or_else(|| DEFAULT_SCREENER_CONFIG_PATH.to_string()),
            market_data_base_url,
            market_data_file: lookup("MARKET_DATA_FILE").filter(|v| !v.trim().is_empty()),
            report_format,
        })
    }
}
