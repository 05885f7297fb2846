/// Exponential Moving Average series over `values`.
///
/// Seeded with the SMA of the first `period` values, then smoothed with
/// `k = 2 / (period + 1)`. Element `i` of the result corresponds to
/// `values[i + period - 1]`. Empty when `values` is shorter than `period`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    let k = 2.0 / (period as f64 + 1.0);

    let mut ema_val: f64 = values[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(ema_val);

    for &price in &values[period..] {
        ema_val = price * k + ema_val * (1.0 - k);
        out.push(ema_val);
    }
    out
}

/// Latest EMA value, or `None` with fewer than `period` values.
pub fn compute_ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}
