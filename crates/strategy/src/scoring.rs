use common::{CrossoverClass, MomentumMetrics, Score};

/// Additive momentum score. Every rule is evaluated and summed:
///
/// | rule                                   | points |
/// |----------------------------------------|--------|
/// | `return_7d > 0.05` / else `> 0`        | 2 / 1  |
/// | `30 < rsi < 70`                        | 1      |
/// | `rsi < 30` or `50 <= rsi <= 60`        | 1      |
/// | `BullishCrossUp` / `AboveNoCross`      | 2 / 1  |
/// | `ema_fast > ema_slow`                  | 1      |
///
/// A rule reading an absent field contributes nothing.
pub fn momentum_score(metrics: &MomentumMetrics, crossover: CrossoverClass) -> Score {
    let mut score = 0u8;

    // 7-day return
    match metrics.return_7d {
        Some(r) if r > 0.05 => score += 2,
        Some(r) if r > 0.0 => score += 1,
        _ => {}
    }

    // RSI
    if let Some(rsi) = metrics.rsi {
        if rsi > 30.0 && rsi < 70.0 {
            score += 1;
        }
        if rsi < 30.0 || (50.0..=60.0).contains(&rsi) {
            score += 1;
        }
    }

    // MACD crossover
    score += match crossover {
        CrossoverClass::BullishCrossUp => 2,
        CrossoverClass::AboveNoCross => 1,
        CrossoverClass::Below | CrossoverClass::InsufficientData => 0,
    };

    // EMA trend
    if let (Some(fast), Some(slow)) = (metrics.ema_fast, metrics.ema_slow) {
        if fast > slow {
            score += 1;
        }
    }

    Score::from_value(score)
}
