pub mod market_data;
pub mod screener;

pub use market_data::{InMemoryMarketData, YahooChartClient};
pub use screener::Screener;
