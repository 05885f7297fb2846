/// Fractional change between the latest close and the close `n` sessions
/// earlier: `(last - base) / base`.
///
/// `None` when there are not more than `n` closes or the base close is zero.
pub fn compute_return_n(closes: &[f64], n: usize) -> Option<f64> {
    if closes.len() <= n {
        return None;
    }
    let last = *closes.last()?;
    let base = closes[closes.len() - 1 - n];
    if base == 0.0 {
        return None;
    }
    let ret = (last - base) / base;
    ret.is_finite().then_some(ret)
}
