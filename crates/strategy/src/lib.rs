pub mod analysis;
pub mod classifier;
pub mod config;
pub mod crossover;
pub mod indicators;
pub mod scoring;
pub mod screen;

pub use analysis::{analyze_instrument, compute_metrics, readiness, RETURN_HORIZON};
pub use classifier::{classify, is_short_candidate, matching_rule, Rule, RuleInput, RULES};
pub use config::{IndicatorParams, ScreenerConfig};
pub use crossover::{crossover_for, detect_crossover};
pub use scoring::momentum_score;
pub use screen::momentum_screen;
