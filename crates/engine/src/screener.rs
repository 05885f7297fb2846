use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use common::{
    BatchReport, InstrumentAnalysis, MarketDataClient, Recommendation, SkipReason,
    SkippedInstrument,
};
use strategy::{analyze_instrument, ScreenerConfig};

/// RSI at or above this level keeps an instrument out of the top picks.
const TOP_PICK_RSI_CEILING: f64 = 70.0;

/// Runs the analysis over a set of instruments.
///
/// One fetch per instrument, at most `max_concurrent_fetches` in flight.
/// A failure for one instrument never aborts the batch: it is logged and
/// listed in `BatchReport::skipped`.
pub struct Screener {
    client: Arc<dyn MarketDataClient>,
    config: ScreenerConfig,
}

impl Screener {
    pub fn new(client: Arc<dyn MarketDataClient>, config: ScreenerConfig) -> Self {
        Self { client, config }
    }

    /// Analyze the configured symbol list.
    pub async fn run(&self) -> BatchReport {
        self.analyze_batch(self.config.symbols.as_slice()).await
    }

    /// Analyze `symbols`, ranked by `return_7d` descending (ties by symbol).
    /// Duplicate symbols are analyzed once.
    pub async fn analyze_batch<S: AsRef<str>>(&self, symbols: &[S]) -> BatchReport {
        let mut seen = HashSet::new();
        let unique: Vec<String> = symbols
            .iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();

        let concurrency = self.config.max_concurrent_fetches.max(1);
        info!(instruments = unique.len(), concurrency, "Starting batch analysis");

        let outcomes: Vec<Result<InstrumentAnalysis, SkippedInstrument>> = stream::iter(unique)
            .map(|symbol| async move { self.analyze_one(symbol).await })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut all = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(analysis) => all.push(analysis),
                Err(skip) => skipped.push(skip),
            }
        }

        rank(&mut all);
        skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        let top_picks = top_picks(&all, self.config.top_n);

        info!(
            analyzed = all.len(),
            skipped = skipped.len(),
            top_picks = top_picks.len(),
            "Batch analysis complete"
        );

        BatchReport {
            top_picks,
            all,
            skipped,
        }
    }

    async fn analyze_one(&self, symbol: String) -> Result<InstrumentAnalysis, SkippedInstrument> {
        let series = match self
            .client
            .fetch_closes(&symbol, self.config.lookback_days)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Failed to fetch closes, skipping");
                return Err(SkippedInstrument {
                    symbol,
                    reason: SkipReason::FetchFailed {
                        error: e.to_string(),
                    },
                });
            }
        };

        match analyze_instrument(&series, &self.config.indicators) {
            Ok(analysis) => {
                if analysis.is_degraded() {
                    info!(
                        symbol = %symbol,
                        closes = series.len(),
                        "Degraded data, MACD signal still warming up"
                    );
                }
                Ok(analysis)
            }
            Err(e) => {
                warn!(symbol = %symbol, closes = series.len(), error = %e, "Excluded from batch");
                Err(SkippedInstrument {
                    symbol,
                    reason: e.into(),
                })
            }
        }
    }
}

/// Sort by `return_7d` descending; absent returns last; ties by symbol.
pub fn rank(analyses: &mut [InstrumentAnalysis]) {
    analyses.sort_by(|a, b| {
        let by_return = match (a.metrics().return_7d, b.metrics().return_7d) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_return.then_with(|| a.symbol().cmp(b.symbol()))
    });
}

/// First `n` ranked instruments with positive return and RSI below 70.
pub fn top_picks(ranked: &[InstrumentAnalysis], n: usize) -> Vec<Recommendation> {
    ranked
        .iter()
        .filter(|a| {
            let m = a.metrics();
            m.rsi.is_some_and(|rsi| rsi < TOP_PICK_RSI_CEILING)
                && m.return_7d.is_some_and(|r| r > 0.0)
        })
        .take(n)
        .map(|a| a.recommendation.clone())
        .collect()
}
