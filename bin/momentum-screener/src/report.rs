use std::fmt::Write;

use common::{BatchReport, SkipReason};

fn opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

/// Plain-text rendering of a batch: top picks, momentum screen, MACD
/// crossovers, score ranking, then skipped instruments.
pub fn render_text(batch: &BatchReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_sections(&mut out, batch);
    out
}

fn write_sections(out: &mut String, batch: &BatchReport) -> std::fmt::Result {
    writeln!(out, "== Top picks ==")?;
    if batch.top_picks.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for pick in &batch.top_picks {
        writeln!(
            out,
            "  {:<8} {:<6} 7d {:>8}  RSI {:>6}  {}",
            pick.symbol,
            pick.action.to_string(),
            pick.metrics.return_7d_percent().unwrap_or_else(|| "-".into()),
            opt(pick.metrics.rsi, 2),
            pick.reason
        )?;
    }

    writeln!(out, "\n== Momentum screen ==")?;
    for a in &batch.all {
        let m = a.metrics();
        writeln!(
            out,
            "  {:<8} 7d {:>8}  RSI {:>6}  {:<6} {}",
            a.symbol(),
            m.return_7d_percent().unwrap_or_else(|| "-".into()),
            opt(m.rsi, 2),
            a.screen.action.to_string(),
            a.screen.reason
        )?;
    }

    writeln!(out, "\n== MACD crossovers ==")?;
    for a in &batch.all {
        let m = a.metrics();
        writeln!(
            out,
            "  {:<8} MACD {:>8}  Signal {:>8}  {} / {} / {}{}",
            a.symbol(),
            opt(m.macd_line(), 4),
            opt(m.macd_signal(), 4),
            a.crossover.condition(),
            a.crossover.meaning(),
            a.crossover.suggested_action(),
            if a.is_degraded() { "  [degraded]" } else { "" }
        )?;
    }

    writeln!(out, "\n== Recommendations by score ==")?;
    for a in batch.by_score() {
        writeln!(
            out,
            "  {:<8} score {:>2} ({:<5})  {:<6} {}",
            a.symbol(),
            a.score.value,
            a.score.meaning.to_string(),
            a.recommendation.action.to_string(),
            a.recommendation.reason
        )?;
    }

    if !batch.skipped.is_empty() {
        writeln!(out, "\n== Skipped ==")?;
        for s in &batch.skipped {
            let why = match &s.reason {
                SkipReason::FetchFailed { error } => format!("fetch failed: {error}"),
                SkipReason::InsufficientData { points, required } => {
                    format!("insufficient data ({points} closes, need {required})")
                }
                SkipReason::InvalidSeries { error } => format!("invalid series: {error}"),
            };
            writeln!(out, "  {:<8} {}", s.symbol, why)?;
        }
    }
    Ok(())
}
