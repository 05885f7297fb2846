/// Wilder RSI over the last `period` price changes, in [0, 100].
///
/// `None` with fewer than `period + 1` closes, for a flat window (no gains
/// and no losses), or when the averages overflow to a non-finite value.
pub fn compute_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() <= period {
        return None;
    }

    let n = period as f64;
    let split = |change: f64| (change.max(0.0), (-change).max(0.0));
    let mut changes = closes.windows(2).map(|w| split(w[1] - w[0]));

    // Seed with the plain mean of the first `period` changes
    let (mut avg_gain, mut avg_loss) = changes
        .by_ref()
        .take(period)
        .fold((0.0, 0.0), |(g, l), (gain, loss)| (g + gain, l + loss));
    avg_gain /= n;
    avg_loss /= n;

    for (gain, loss) in changes {
        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
    }

    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return None;
    }
    match (avg_gain == 0.0, avg_loss == 0.0) {
        (true, true) => None,
        (_, true) => Some(100.0),
        _ => {
            let rsi = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
            rsi.is_finite().then_some(rsi.clamp(0.0, 100.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_one_more_close_than_period() {
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert!(compute_rsi(&prices, 14).is_none());

        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        assert!(compute_rsi(&prices, 14).is_some());
    }

    #[test]
    fn only_gains_saturates_at_upper_bound() {
        let value = compute_rsi(&[10.0, 11.0, 12.0, 13.0, 14.0], 3).unwrap();
        assert!((value - 100.0).abs() < 1e-6, "got {value}");
    }

    #[test]
    fn only_losses_sits_at_lower_bound() {
        let value = compute_rsi(&[14.0, 13.0, 12.0, 11.0, 10.0], 3).unwrap();
        assert!(value.abs() < 1e-6, "got {value}");
    }

    #[test]
    fn rsi_flat_window_is_absent() {
        let prices = vec![100.0; 30];
        assert!(compute_rsi(&prices, 14).is_none());
    }

    #[test]
    fn rsi_zero_period_is_absent() {
        assert!(compute_rsi(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn overflowing_averages_are_absent() {
        let prices: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 0.0 } else { f64::MAX }).collect();
        assert!(compute_rsi(&prices, 14).is_none());
    }

    #[test]
    fn rsi_known_value() {
        // Two gains of 1 and one loss of 1 over a 3-period window:
        // avg_gain = 2/3, avg_loss = 1/3, RS = 2, RSI = 100 - 100/3
        let prices = vec![10.0, 11.0, 10.0, 11.0];
        let value = compute_rsi(&prices, 3).unwrap();
        assert!((value - (100.0 - 100.0 / 3.0)).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn rsi_applies_wilder_smoothing() {
        // period 2: initial changes +2, -1 → avg_gain 1.0, avg_loss 0.5
        // next change +1 → avg_gain (1.0 + 1)/2 = 1.0, avg_loss (0.5 + 0)/2 = 0.25
        // RS = 4, RSI = 80
        let prices = vec![10.0, 12.0, 11.0, 12.0];
        let value = compute_rsi(&prices, 2).unwrap();
        assert!((value - 80.0).abs() < 1e-9, "got {value}");
    }
}
