use common::{CrossoverClass, MomentumMetrics};

/// Classify the trend from the last two `(line, signal)` pairs.
///
/// Only an upward cross on the latest bar counts as `BullishCrossUp`;
/// no smoothing or debounce.
pub fn detect_crossover(pairs: &[(f64, f64)]) -> CrossoverClass {
    let [.., (prev_line, prev_signal), (curr_line, curr_signal)] = pairs else {
        return CrossoverClass::InsufficientData;
    };

    if prev_line < prev_signal && curr_line > curr_signal {
        CrossoverClass::BullishCrossUp
    } else if curr_line > curr_signal {
        CrossoverClass::AboveNoCross
    } else {
        CrossoverClass::Below
    }
}

/// Crossover class for a computed indicator set.
pub fn crossover_for(metrics: &MomentumMetrics) -> CrossoverClass {
    match &metrics.macd {
        Some(macd) => detect_crossover(&macd.line_signal_pairs()),
        None => CrossoverClass::InsufficientData,
    }
}
