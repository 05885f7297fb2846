//! Pure indicator functions over close prices (oldest first).
//!
//! Every function returns `None` instead of a placeholder value when the
//! input is too short or the result is undefined.

pub mod ema;
pub mod macd;
pub mod returns;
pub mod rsi;

pub use ema::{compute_ema, ema_series};
pub use macd::{compute_macd, MacdIndicator};
pub use returns::compute_return_n;
pub use rsi::compute_rsi;
