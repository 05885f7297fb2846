use common::{Action, MomentumMetrics, ScreenVerdict};

/// Simple momentum screen on return and RSI alone, independent of MACD.
pub fn momentum_screen(metrics: &MomentumMetrics) -> ScreenVerdict {
    let ret = metrics.return_7d;
    let rsi = metrics.rsi;

    let (action, reason) = match (ret, rsi) {
        (Some(r), Some(rsi)) if r > 0.0 && rsi < 70.0 => (Action::Buy, "Strong momentum, RSI < 70"),
        (Some(r), Some(rsi)) if r > 0.0 && rsi >= 70.0 => {
            (Action::Watch, "Very strong momentum, but overbought")
        }
        (Some(r), Some(rsi)) if r <= 0.0 && rsi >= 70.0 => (Action::Avoid, "Overbought"),
        _ => (Action::Avoid, "Negative returns, weak momentum"),
    };

    ScreenVerdict {
        action,
        reason: reason.to_string(),
    }
}
