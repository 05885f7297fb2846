use common::{MacdPoint, MacdSeries};

use super::ema::ema_series;

/// MACD (Moving Average Convergence/Divergence) indicator.
///
/// Computes: MACD line = EMA(fast) − EMA(slow), Signal = EMA(macd_line, signal_period),
/// Histogram = line − signal, bar by bar over the window where both EMAs exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdIndicator {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdIndicator {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdIndicator {
    /// Compute the MACD series from close prices (oldest first).
    /// Returns `None` with fewer than `slow` closes (no MACD line yet), or
    /// when the periods are zero or `fast >= slow`.
    ///
    /// With fewer than `signal` line values the signal is the running mean
    /// of the line so far; `MacdSeries::warmup` counts those bars.
    pub fn compute(&self, closes: &[f64]) -> Option<MacdSeries> {
        if self.fast == 0 || self.signal == 0 || self.fast >= self.slow {
            return None;
        }
        if closes.len() < self.slow {
            return None;
        }

        let fast = ema_series(closes, self.fast);
        let slow = ema_series(closes, self.slow);
        let offset = self.slow - self.fast;

        let line: Vec<f64> = slow
            .iter()
            .enumerate()
            .map(|(i, s)| fast[i + offset] - s)
            .collect();
        let signal = signal_line(&line, self.signal);

        let points = line
            .iter()
            .zip(&signal)
            .map(|(&line, &signal)| MacdPoint {
                line,
                signal,
                histogram: line - signal,
            })
            .collect::<Vec<_>>();

        Some(MacdSeries {
            warmup: (self.signal - 1).min(points.len()),
            points,
        })
    }
}

/// MACD with explicit periods.
pub fn compute_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdSeries> {
    MacdIndicator { fast, slow, signal }.compute(closes)
}

/// EMA of the MACD line, one value per line bar.
///
/// Bars before `period` use the cumulative mean, which equals the SMA seed
/// at bar `period - 1`; later bars follow the EMA recursion.
fn signal_line(line: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out: Vec<f64> = Vec::with_capacity(line.len());
    let mut sum = 0.0;

    for (i, &value) in line.iter().enumerate() {
        let next = match out.last() {
            Some(&prev) if i >= period => value * k + prev * (1.0 - k),
            _ => {
                sum += value;
                sum / (i + 1) as f64
            }
        };
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_up(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5).collect()
    }

    #[test]
    fn macd_returns_none_before_slow_period() {
        let macd = MacdIndicator::default();
        let prices = trending_up(25);
        assert!(macd.compute(&prices).is_none());
    }

    #[test]
    fn macd_series_covers_every_bar_after_slow_period() {
        let macd = MacdIndicator::default();
        let series = macd.compute(&trending_up(60)).unwrap();
        assert_eq!(series.points.len(), 60 - 26 + 1);
        assert_eq!(series.warmup, 8);
        assert!(series.is_stable());
    }

    #[test]
    fn short_window_is_all_warmup() {
        let macd = MacdIndicator::default();
        let series = macd.compute(&trending_up(30)).unwrap();
        assert_eq!(series.points.len(), 5);
        assert_eq!(series.warmup, 5);
        assert!(!series.is_stable());
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let macd = MacdIndicator { fast: 3, slow: 6, signal: 3 };
        let mut prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64 * 0.5).collect();
        prices.extend((0..20).map(|i| 90.0 + i as f64 * 2.0));
        let series = macd.compute(&prices).unwrap();
        for p in &series.points {
            assert!((p.histogram - (p.line - p.signal)).abs() < 1e-12);
        }
    }

    #[test]
    fn signal_warmup_then_ema() {
        // period 2 → k = 2/3; bar0 = 1, bar1 = mean(1, 3) = 2,
        // bar2 = 6 * 2/3 + 2 * 1/3 = 14/3
        let signal = signal_line(&[1.0, 3.0, 6.0], 2);
        assert!((signal[0] - 1.0).abs() < 1e-12);
        assert!((signal[1] - 2.0).abs() < 1e-12);
        assert!((signal[2] - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_prices_give_flat_macd() {
        let series = compute_macd(&[50.0; 40], 12, 26, 9).unwrap();
        let last = series.last().unwrap();
        assert!(last.line.abs() < 1e-12);
        assert!(last.signal.abs() < 1e-12);
    }

    #[test]
    fn invalid_periods_yield_none() {
        assert!(compute_macd(&trending_up(60), 26, 12, 9).is_none());
        assert!(compute_macd(&trending_up(60), 12, 26, 0).is_none());
        let equal = MacdIndicator { fast: 26, ..MacdIndicator::default() };
        assert!(equal.compute(&trending_up(60)).is_none());
    }
}
