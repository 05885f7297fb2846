//! First-match-wins recommendation table.
//!
//! Rules are evaluated in `RULES` order. The short rule sits after the
//! `return_7d <= 0` rule and never fires, because its own predicate
//! requires `return_7d < 0`.

use common::{Action, CrossoverClass, MomentumMetrics, Recommendation};

/// Values a rule predicate may read.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub metrics: &'a MomentumMetrics,
    pub crossover: CrossoverClass,
}

/// One row of the decision table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub action: Action,
    pub reason: &'static str,
    predicate: fn(&RuleInput<'_>) -> bool,
}

impl Rule {
    pub fn matches(&self, input: &RuleInput<'_>) -> bool {
        (self.predicate)(input)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("action", &self.action)
            .finish()
    }
}

pub static RULES: [Rule; 6] = [
    Rule {
        name: "buy_confirmed",
        action: Action::Buy,
        reason: "Strong momentum, RSI < 70, MACD confirms",
        predicate: |i: &RuleInput<'_>| {
            positive_return(i) && rsi_below(i, 70.0) && i.crossover.is_positive()
        },
    },
    Rule {
        name: "watch_overbought",
        action: Action::Watch,
        reason: "Momentum strong, but overbought (RSI >= 70). MACD positive",
        predicate: |i: &RuleInput<'_>| {
            positive_return(i)
                && i.metrics.rsi.is_some_and(|rsi| rsi >= 70.0)
                && i.crossover.is_positive()
        },
    },
    Rule {
        name: "watch_macd_weak",
        action: Action::Watch,
        reason: "Momentum strong, but MACD weak",
        predicate: |i: &RuleInput<'_>| {
            positive_return(i) && i.crossover == CrossoverClass::Below
        },
    },
    Rule {
        name: "avoid_negative",
        action: Action::Avoid,
        reason: "Negative returns, weak momentum",
        predicate: |i: &RuleInput<'_>| i.metrics.return_7d.is_some_and(|r| r <= 0.0),
    },
    Rule {
        name: "short_candidate",
        action: Action::Short,
        reason: "Overbought + MACD bearish + momentum reversal",
        predicate: is_short_candidate,
    },
    Rule {
        name: "avoid_default",
        action: Action::Avoid,
        reason: "No strong buy signal",
        predicate: |_: &RuleInput<'_>| true,
    },
];

fn positive_return(input: &RuleInput<'_>) -> bool {
    input.metrics.return_7d.is_some_and(|r| r > 0.0)
}

fn rsi_below(input: &RuleInput<'_>, limit: f64) -> bool {
    input.metrics.rsi.is_some_and(|rsi| rsi < limit)
}

/// Overbought, MACD bearish, falling return and EMA trend down.
pub fn is_short_candidate(input: &RuleInput<'_>) -> bool {
    let m = input.metrics;
    let macd_bearish = matches!(
        (m.macd_line(), m.macd_signal()),
        (Some(line), Some(signal)) if line < signal
    );
    let ema_down = matches!(
        (m.ema_fast, m.ema_slow),
        (Some(fast), Some(slow)) if fast < slow
    );

    m.rsi.is_some_and(|rsi| rsi > 70.0)
        && macd_bearish
        && m.return_7d.is_some_and(|r| r < 0.0)
        && ema_down
        && input.crossover == CrossoverClass::Below
}

/// First rule in `RULES` whose predicate holds.
pub fn matching_rule(input: &RuleInput<'_>) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(input))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Turn an indicator set into a recommendation for `symbol`.
pub fn classify(
    symbol: impl Into<String>,
    metrics: MomentumMetrics,
    crossover: CrossoverClass,
) -> Recommendation {
    let rule = matching_rule(&RuleInput {
        metrics: &metrics,
        crossover,
    });
    Recommendation {
        symbol: symbol.into(),
        action: rule.action,
        reason: rule.reason.to_string(),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use common::{Confidence, MacdPoint, MacdSeries};

    use super::*;

    fn metrics(return_7d: f64, rsi: f64) -> MomentumMetrics {
        MomentumMetrics {
            return_7d: Some(return_7d),
            rsi: Some(rsi),
            macd: None,
            ema_fast: Some(10.0),
            ema_slow: Some(10.0),
            confidence: Confidence::Full,
        }
    }

    fn short_setup() -> MomentumMetrics {
        MomentumMetrics {
            return_7d: Some(-0.04),
            rsi: Some(75.0),
            macd: Some(MacdSeries {
                points: vec![
                    MacdPoint { line: 0.5, signal: 0.8, histogram: -0.3 },
                    MacdPoint { line: 0.2, signal: 0.7, histogram: -0.5 },
                ],
                warmup: 0,
            }),
            ema_fast: Some(9.0),
            ema_slow: Some(10.0),
            confidence: Confidence::Full,
        }
    }

    #[test]
    fn positive_return_rsi_under_70_and_macd_up_is_buy() {
        let rec = classify("AAA", metrics(0.08, 45.0), CrossoverClass::BullishCrossUp);
        assert_eq!(rec.action, Action::Buy);
        assert_eq!(rec.reason, "Strong momentum, RSI < 70, MACD confirms");

        let rec = classify("AAA", metrics(0.01, 69.9), CrossoverClass::AboveNoCross);
        assert_eq!(rec.action, Action::Buy);
    }

    #[test]
    fn overbought_with_macd_up_is_watch() {
        let rec = classify("AAA", metrics(0.08, 70.0), CrossoverClass::AboveNoCross);
        assert_eq!(rec.action, Action::Watch);

        let input = RuleInput {
            metrics: &rec.metrics,
            crossover: CrossoverClass::AboveNoCross,
        };
        assert_eq!(matching_rule(&input).name, "watch_overbought");
    }

    #[test]
    fn positive_return_with_macd_below_is_watch() {
        let rec = classify("AAA", metrics(0.08, 45.0), CrossoverClass::Below);
        assert_eq!(rec.action, Action::Watch);
        assert_eq!(rec.reason, "Momentum strong, but MACD weak");
    }

    #[test]
    fn non_positive_return_is_avoid() {
        let rec = classify("AAA", metrics(0.0, 45.0), CrossoverClass::BullishCrossUp);
        assert_eq!(rec.action, Action::Avoid);
        assert_eq!(rec.reason, "Negative returns, weak momentum");
    }

    #[test]
    fn short_predicate_holds_but_rule_is_shadowed() {
        let m = short_setup();
        let input = RuleInput { metrics: &m, crossover: CrossoverClass::Below };
        assert!(is_short_candidate(&input));

        let rule = matching_rule(&input);
        assert_eq!(rule.name, "avoid_negative");
        assert_eq!(classify("SHRT", m, CrossoverClass::Below).action, Action::Avoid);
    }

    #[test]
    fn short_is_never_produced() {
        for r in [-0.5, -0.01, 0.0, 0.01, 0.5] {
            for rsi in [10.0, 50.0, 70.0, 90.0] {
                for c in [
                    CrossoverClass::InsufficientData,
                    CrossoverClass::BullishCrossUp,
                    CrossoverClass::AboveNoCross,
                    CrossoverClass::Below,
                ] {
                    let m = MomentumMetrics { return_7d: Some(r), rsi: Some(rsi), ..short_setup() };
                    assert_ne!(classify("X", m, c).action, Action::Short);
                }
            }
        }
    }

    #[test]
    fn positive_return_without_macd_falls_through_to_default() {
        let rec = classify("AAA", metrics(0.08, 45.0), CrossoverClass::InsufficientData);
        assert_eq!(rec.action, Action::Avoid);
        assert_eq!(rec.reason, "No strong buy signal");
    }

    #[test]
    fn absent_fields_never_match() {
        let m = MomentumMetrics {
            return_7d: None,
            rsi: None,
            macd: None,
            ema_fast: None,
            ema_slow: None,
            confidence: Confidence::Full,
        };
        let rec = classify("NONE", m, CrossoverClass::BullishCrossUp);
        assert_eq!(rec.action, Action::Avoid);
        assert_eq!(rec.reason, "No strong buy signal");
    }

    #[test]
    fn absent_rsi_skips_rsi_rules() {
        let m = MomentumMetrics { rsi: None, ..metrics(0.08, 0.0) };
        let rec = classify("AAA", m, CrossoverClass::AboveNoCross);
        assert_eq!(rec.action, Action::Avoid);
        assert_eq!(rec.reason, "No strong buy signal");
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "buy_confirmed",
                "watch_overbought",
                "watch_macd_weak",
                "avoid_negative",
                "short_candidate",
                "avoid_default",
            ]
        );
    }
}
