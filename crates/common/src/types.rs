use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Daily closing prices for one instrument, oldest first.
///
/// Order is significant and never changed after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    closes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, closes: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            closes,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Check that every close is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self
            .closes
            .iter()
            .position(|c| !c.is_finite() || *c < 0.0)
        {
            Some(idx) => Err(AnalysisError::InvalidSeries(format!(
                "{}: close #{idx} is {}",
                self.symbol, self.closes[idx]
            ))),
            None => Ok(()),
        }
    }
}

/// One bar of the MACD output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD line, signal and histogram aligned bar by bar.
///
/// The first `warmup` points carry a signal averaged over fewer than
/// `signal_period` line values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdSeries {
    pub points: Vec<MacdPoint>,
    pub warmup: usize,
}

impl MacdSeries {
    pub fn last(&self) -> Option<&MacdPoint> {
        self.points.last()
    }

    /// `(line, signal)` pairs in bar order, the input of crossover detection.
    pub fn line_signal_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.line, p.signal)).collect()
    }

    pub fn histogram(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.histogram).collect()
    }

    /// True when the latest signal value is past its warm-up window.
    pub fn is_stable(&self) -> bool {
        self.points.len() > self.warmup
    }
}

/// How much history backed an indicator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Full,
    /// Computed from a shorter window than full MACD stability needs.
    Degraded,
}

/// Indicator values derived from one price series.
///
/// A field is `None` whenever the series was too short for that indicator
/// or the computation had no defined value (e.g. a zero divisor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumMetrics {
    /// Fractional change over the last 8 closes.
    pub return_7d: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdSeries>,
    /// EMA over the fast period (9 by default).
    pub ema_fast: Option<f64>,
    /// EMA over the slow period (21 by default).
    pub ema_slow: Option<f64>,
    pub confidence: Confidence,
}

impl MomentumMetrics {
    pub fn macd_line(&self) -> Option<f64> {
        self.macd.as_ref()?.last().map(|p| p.line)
    }

    pub fn macd_signal(&self) -> Option<f64> {
        self.macd.as_ref()?.last().map(|p| p.signal)
    }

    pub fn macd_histogram(&self) -> Vec<f64> {
        self.macd
            .as_ref()
            .map(MacdSeries::histogram)
            .unwrap_or_default()
    }

    pub fn is_degraded(&self) -> bool {
        self.confidence == Confidence::Degraded
    }

    /// `return_7d` as a percentage string with two decimals, e.g. `"6.28%"`.
    pub fn return_7d_percent(&self) -> Option<String> {
        self.return_7d.map(|r| format!("{:.2}%", r * 100.0))
    }
}

/// Trend classification from the last two MACD line/signal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverClass {
    InsufficientData,
    /// Line moved from below the signal to above it on the latest bar.
    BullishCrossUp,
    AboveNoCross,
    Below,
}

impl CrossoverClass {
    pub fn is_positive(self) -> bool {
        matches!(self, CrossoverClass::BullishCrossUp | CrossoverClass::AboveNoCross)
    }

    pub fn condition(self) -> &'static str {
        match self {
            CrossoverClass::InsufficientData => "N/A",
            CrossoverClass::BullishCrossUp => "MACD crosses above Signal (from below)",
            CrossoverClass::AboveNoCross => "MACD above Signal (no crossover check)",
            CrossoverClass::Below => "MACD below Signal",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            CrossoverClass::InsufficientData => "Not enough data",
            CrossoverClass::BullishCrossUp => "Bullish momentum turning up",
            CrossoverClass::AboveNoCross => "Momentum positive",
            CrossoverClass::Below => "Momentum weak",
        }
    }

    pub fn suggested_action(self) -> &'static str {
        match self {
            CrossoverClass::InsufficientData => "No action",
            CrossoverClass::BullishCrossUp => "BUY",
            CrossoverClass::AboveNoCross => "Optional BUY",
            CrossoverClass::Below => "Wait/Avoid",
        }
    }
}

/// Coarse interpretation of a momentum score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meaning {
    Avoid,
    Watch,
    Buy,
}

impl std::fmt::Display for Meaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meaning::Avoid => write!(f, "Avoid"),
            Meaning::Watch => write!(f, "Watch"),
            Meaning::Buy => write!(f, "BUY"),
        }
    }
}

/// Additive momentum score (0..=10) and its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub value: u8,
    pub meaning: Meaning,
}

impl Score {
    /// Map a raw score to its band: 8..=10 Buy, 5..=7 Watch, otherwise Avoid.
    pub fn from_value(value: u8) -> Self {
        let meaning = match value {
            8..=10 => Meaning::Buy,
            5..=7 => Meaning::Watch,
            _ => Meaning::Avoid,
        };
        Self { value, meaning }
    }
}

/// Final trading action for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Watch,
    Avoid,
    Short,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Watch => write!(f, "WATCH"),
            Action::Avoid => write!(f, "AVOID"),
            Action::Short => write!(f, "SHORT"),
        }
    }
}

/// Classifier output for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: String,
    pub action: Action,
    pub reason: String,
    pub metrics: MomentumMetrics,
}

/// Verdict of the simple momentum screen (return and RSI only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenVerdict {
    pub action: Action,
    pub reason: String,
}

/// Non-fatal conditions attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Fewer closes than full MACD stability needs; the result is usable
    /// but lower confidence.
    DegradedData {
        points: usize,
        full_confidence_points: usize,
    },
}

/// Everything computed for one instrument in a single call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAnalysis {
    pub crossover: CrossoverClass,
    pub score: Score,
    pub recommendation: Recommendation,
    pub screen: ScreenVerdict,
    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
}

impl InstrumentAnalysis {
    pub fn symbol(&self) -> &str {
        &self.recommendation.symbol
    }

    pub fn metrics(&self) -> &MomentumMetrics {
        &self.recommendation.metrics
    }

    pub fn is_degraded(&self) -> bool {
        self.metrics().is_degraded()
    }
}

/// Why an instrument was left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    FetchFailed { error: String },
    InsufficientData { points: usize, required: usize },
    InvalidSeries { error: String },
}

impl From<AnalysisError> for SkipReason {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InsufficientData { points, required } => {
                SkipReason::InsufficientData { points, required }
            }
            AnalysisError::InvalidSeries(error) => SkipReason::InvalidSeries { error },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Output of one batch run.
///
/// `all` is ordered by `return_7d` descending, ties by symbol ascending.
/// `top_picks` is the prefix of that order with `rsi < 70` and
/// `return_7d > 0`, capped at the configured count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub top_picks: Vec<Recommendation>,
    pub all: Vec<InstrumentAnalysis>,
    pub skipped: Vec<SkippedInstrument>,
}

impl BatchReport {
    /// Analyses ordered by score descending, ties by symbol ascending.
    pub fn by_score(&self) -> Vec<&InstrumentAnalysis> {
        let mut ranked: Vec<&InstrumentAnalysis> = self.all.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .value
                .cmp(&a.score.value)
                .then_with(|| a.symbol().cmp(b.symbol()))
        });
        ranked
    }
}
