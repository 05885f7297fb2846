use common::{
    AnalysisError, AnalysisWarning, Confidence, InstrumentAnalysis, MomentumMetrics, PriceSeries,
};

use crate::classifier::classify;
use crate::config::IndicatorParams;
use crate::crossover::crossover_for;
use crate::indicators::{compute_ema, compute_return_n, compute_rsi, MacdIndicator};
use crate::scoring::momentum_score;
use crate::screen::momentum_screen;

/// Sessions covered by the short-horizon return.
pub const RETURN_HORIZON: usize = 7;

/// Readiness of a series of `len` closes: an error below `min_points`,
/// degraded below `full_confidence_points`, full otherwise.
pub fn readiness(len: usize, params: &IndicatorParams) -> Result<Confidence, AnalysisError> {
    if len < params.min_points {
        Err(AnalysisError::InsufficientData {
            points: len,
            required: params.min_points,
        })
    } else if len < params.full_confidence_points {
        Ok(Confidence::Degraded)
    } else {
        Ok(Confidence::Full)
    }
}

/// Compute the full indicator set for one series of closes.
pub fn compute_metrics(
    closes: &[f64],
    params: &IndicatorParams,
) -> Result<MomentumMetrics, AnalysisError> {
    let confidence = readiness(closes.len(), params)?;
    let macd = MacdIndicator {
        fast: params.macd_fast,
        slow: params.macd_slow,
        signal: params.macd_signal,
    };

    Ok(MomentumMetrics {
        return_7d: compute_return_n(closes, RETURN_HORIZON),
        rsi: compute_rsi(closes, params.rsi_period),
        macd: macd.compute(closes),
        ema_fast: compute_ema(closes, params.ema_fast),
        ema_slow: compute_ema(closes, params.ema_slow),
        confidence,
    })
}

/// Run indicators, scorer, crossover detection and classifier over one
/// series. Stateless; safe to call concurrently.
pub fn analyze_instrument(
    series: &PriceSeries,
    params: &IndicatorParams,
) -> Result<InstrumentAnalysis, AnalysisError> {
    readiness(series.len(), params)?;
    series.validate()?;
    let metrics = compute_metrics(series.closes(), params)?;

    let warnings = match metrics.confidence {
        Confidence::Degraded => vec![AnalysisWarning::DegradedData {
            points: series.len(),
            full_confidence_points: params.full_confidence_points,
        }],
        Confidence::Full => Vec::new(),
    };

    let crossover = crossover_for(&metrics);
    let score = momentum_score(&metrics, crossover);
    let screen = momentum_screen(&metrics);
    let recommendation = classify(series.symbol(), metrics, crossover);

    Ok(InstrumentAnalysis {
        crossover,
        score,
        recommendation,
        screen,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use common::{Action, CrossoverClass};

    use super::*;

    fn rising(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 * 0.5 + if i % 3 == 0 { -0.8 } else { 0.0 }).collect()
    }

    #[test]
    fn under_thirty_points_is_insufficient() {
        let params = IndicatorParams::default();
        for n in [0, 1, 8, 15, 29] {
            let err = analyze_instrument(&PriceSeries::new("S", rising(n)), &params).unwrap_err();
            assert_eq!(err, AnalysisError::InsufficientData { points: n, required: 30 });
        }
    }

    #[test]
    fn thirty_and_thirty_four_points_are_degraded() {
        let params = IndicatorParams::default();
        for n in [30, 34] {
            let analysis = analyze_instrument(&PriceSeries::new("S", rising(n)), &params).unwrap();
            assert!(analysis.is_degraded(), "len {n} should be degraded");
            assert_eq!(
                analysis.warnings,
                vec![AnalysisWarning::DegradedData { points: n, full_confidence_points: 35 }]
            );
            assert!(analysis.metrics().macd_signal().is_some());
        }
    }

    #[test]
    fn thirty_five_points_is_full_confidence() {
        let params = IndicatorParams::default();
        let analysis = analyze_instrument(&PriceSeries::new("S", rising(35)), &params).unwrap();
        assert!(!analysis.is_degraded());
        assert!(analysis.warnings.is_empty());
        assert!(analysis.metrics().macd.as_ref().unwrap().is_stable());
    }

    #[test]
    fn invalid_closes_are_rejected() {
        let params = IndicatorParams::default();
        let mut closes = rising(40);
        closes[5] = f64::NAN;
        let err = analyze_instrument(&PriceSeries::new("S", closes), &params).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSeries(_)));
    }

    #[test]
    fn short_series_is_insufficient_even_with_bad_closes() {
        let params = IndicatorParams::default();
        let mut closes = vec![100.0; 10];
        closes[3] = -1.0;
        let err = analyze_instrument(&PriceSeries::new("S", closes), &params).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { points: 10, required: 30 });

        let mut closes = rising(29);
        closes[0] = f64::INFINITY;
        let err = analyze_instrument(&PriceSeries::new("S", closes), &params).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { points: 29, required: 30 });
    }

    #[test]
    fn zero_base_close_leaves_return_absent() {
        let params = IndicatorParams::default();
        let mut closes = rising(40);
        closes[40 - 8] = 0.0;
        let analysis = analyze_instrument(&PriceSeries::new("Z", closes), &params).unwrap();
        assert!(analysis.metrics().return_7d.is_none());
        assert_eq!(analysis.recommendation.action, Action::Avoid);
        assert_eq!(analysis.recommendation.reason, "No strong buy signal");
    }

    #[test]
    fn steady_uptrend_has_positive_momentum() {
        let params = IndicatorParams::default();
        let analysis = analyze_instrument(&PriceSeries::new("UP", rising(50)), &params).unwrap();
        let m = analysis.metrics();
        assert!(m.return_7d.unwrap() > 0.0);
        assert!(m.ema_fast.unwrap() > m.ema_slow.unwrap());
        assert_eq!(analysis.recommendation.symbol, "UP");
        assert_ne!(analysis.crossover, CrossoverClass::InsufficientData);
    }

    #[test]
    fn input_series_is_not_mutated() {
        let params = IndicatorParams::default();
        let series = PriceSeries::new("S", rising(40));
        let before = series.clone();
        let _ = analyze_instrument(&series, &params);
        assert_eq!(series, before);
    }
}
