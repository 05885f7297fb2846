use async_trait::async_trait;

use crate::{FetchError, PriceSeries};

/// Abstraction over the market-data provider.
///
/// `YahooChartClient` implements this against the chart HTTP endpoint.
/// `InMemoryMarketData` implements this for fixtures and offline files.
///
/// Implementations own retrieval and any caching. The screener calls
/// `fetch_closes` once per instrument per batch.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Daily closes for `symbol` over the trailing `lookback_days`,
    /// ordered oldest to newest.
    async fn fetch_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, FetchError>;
}
