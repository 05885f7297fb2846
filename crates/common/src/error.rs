use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Market data error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Failure to retrieve a price series from the market-data provider.
/// Terminal for the affected instrument only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no price data for symbol '{0}'")]
    UnknownSymbol(String),
}

/// Reasons a price series cannot be analyzed at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("insufficient data: {points} closes, at least {required} required")]
    InsufficientData { points: usize, required: usize },

    #[error("invalid price series: {0}")]
    InvalidSeries(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
