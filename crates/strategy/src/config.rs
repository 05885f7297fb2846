use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{Error, Result};

/// Screener config file (TOML).
///
/// Example `config/screener.toml`:
/// ```toml
/// symbols = ["HOOD", "RIVN", "VRT"]
/// lookback_days = 50
/// top_n = 2
/// max_concurrent_fetches = 4
///
/// [indicators]
/// rsi_period = 14
/// macd_fast = 12
/// macd_slow = 26
/// macd_signal = 9
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Instruments analyzed when no explicit list is passed.
    pub symbols: Vec<String>,
    /// Trailing calendar days of closes requested per instrument.
    pub lookback_days: u32,
    /// Maximum number of top picks.
    pub top_n: usize,
    /// Upper bound on in-flight market-data requests.
    pub max_concurrent_fetches: usize,
    pub indicators: IndicatorParams,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            symbols: [
                "HOOD", "RIVN", "ONDS", "DPRO", "UPS", "RDDT", "QTUM", "RXRX", "VRT", "BKSY", "AS",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            lookback_days: 50,
            top_n: 2,
            max_concurrent_fetches: 4,
            indicators: IndicatorParams::default(),
        }
    }
}

/// Indicator periods and the data-readiness floor.
///
/// `min_points` is the shortest series analyzed at all; series shorter than
/// `full_confidence_points` are analyzed but flagged degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub min_points: usize,
    pub full_confidence_points: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ema_fast: 9,
            ema_slow: 21,
            min_points: 30,
            full_confidence_points: 35,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, v)| *v == 0) {
            return Err(Error::Config(format!("indicators.{name} must be positive")));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(Error::Config(format!(
                "indicators.macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.min_points > self.full_confidence_points {
            return Err(Error::Config(format!(
                "indicators.min_points ({}) exceeds full_confidence_points ({})",
                self.min_points, self.full_confidence_points
            )));
        }
        Ok(())
    }
}

impl ScreenerConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read screener config at '{path}': {e}")))?;
        let cfg = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{path}: {e}")))?;
        debug!(path, symbols = cfg.symbols.len(), "Loaded screener config");
        Ok(cfg)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be positive".into()));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(Error::Config("max_concurrent_fetches must be positive".into()));
        }
        if self.lookback_days == 0 {
            return Err(Error::Config("lookback_days must be positive".into()));
        }
        self.indicators.validate()
    }
}
