use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use common::{Error, FetchError, MarketDataClient, PriceSeries, Result};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; momentum-screener/0.1)";

/// REST client for the Yahoo Finance v8 chart endpoint. Daily closes only.
pub struct YahooChartClient {
    base_url: Url,
    http: Client,
}

impl YahooChartClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Other(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid market data base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "market data base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { base_url, http })
    }

    fn chart_url(&self, symbol: &str, lookback_days: u32) -> Url {
        let now = Utc::now();
        let from = now - Duration::days(i64::from(lookback_days));

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url.query_pairs_mut()
            .append_pair("period1", &from.timestamp().to_string())
            .append_pair("period2", &now.timestamp().to_string())
            .append_pair("interval", "1d")
            .append_pair("includePrePost", "false");
        url
    }
}

#[async_trait]
impl MarketDataClient for YahooChartClient {
    async fn fetch_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<PriceSeries, FetchError> {
        let url = self.chart_url(symbol, lookback_days);
        debug!(symbol, lookback_days, "Requesting daily closes");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| FetchError::Http(e.to_string()))?;

        let envelope = serde_json::from_str::<ChartEnvelope>(&body);
        if let Ok(ChartEnvelope {
            chart: ChartBody { error: Some(err), .. },
        }) = &envelope
        {
            return Err(FetchError::Provider(format!("{}: {}", err.code, err.description)));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = envelope.map_err(|e| FetchError::Decode(e.to_string()))?;
        let closes: Vec<f64> = envelope
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.indicators.quote.into_iter().next())
            .map(|q| q.close.into_iter().flatten().collect())
            .unwrap_or_default();

        debug!(symbol, closes = closes.len(), "Received daily closes");
        Ok(PriceSeries::new(symbol, closes))
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Deserialize, Default)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

/// Rows for non-trading intervals carry `null` closes.
#[derive(Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
