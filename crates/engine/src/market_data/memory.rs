use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use common::{FetchError, MarketDataClient, PriceSeries, Result};

/// Market data served from memory, for fixtures and offline runs.
///
/// No network is touched. Each symbol maps either to a close series or to
/// a canned fetch error.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    series: HashMap<String, Result<Vec<f64>, FetchError>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        self.series.insert(symbol.into(), Ok(closes));
        self
    }

    /// Make every fetch of `symbol` fail with `error`.
    pub fn with_failure(mut self, symbol: impl Into<String>, error: FetchError) -> Self {
        self.series.insert(symbol.into(), Err(error));
        self
    }

    /// Parse `{ "SYMBOL": [close, ...], ... }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<f64>> = serde_json::from_str(json)?;
        Ok(Self {
            series: raw.into_iter().map(|(k, v)| (k, Ok(v))).collect(),
        })
    }

    /// Load a JSON closes file (see `from_json_str`).
    pub async fn load(path: &str) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let data = Self::from_json_str(&content)?;
        info!(path, symbols = data.series.len(), "Loaded offline market data");
        Ok(data)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

#[async_trait]
impl MarketDataClient for InMemoryMarketData {
    /// Returns at most the last `lookback_days` closes stored for `symbol`.
    async fn fetch_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, FetchError> {
        let closes = self
            .series
            .get(symbol)
            .ok_or_else(|| FetchError::UnknownSymbol(symbol.to_string()))?
            .clone()?;

        let keep = closes.len().min(lookback_days as usize);
        let window = closes[closes.len() - keep..].to_vec();
        Ok(PriceSeries::new(symbol, window))
    }
}
