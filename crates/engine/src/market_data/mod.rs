mod memory;
mod yahoo;

pub use memory::InMemoryMarketData;
pub use yahoo::YahooChartClient;
