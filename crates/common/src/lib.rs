pub mod config;
pub mod error;
pub mod market_data;
pub mod types;

pub use config::{Config, ReportFormat};
pub use error::{AnalysisError, Error, FetchError, Result};
pub use market_data::MarketDataClient;
pub use types::*;
