//! Running totals for waterfall charts.
//!
//! Delta steps move the running total; checkpoint steps (totals and subtotals) only report where
//! it currently stands and are drawn from zero. Input order is the drawing order and is never
//! re-sorted.

use crate::model::{
    WaterfallBar, WaterfallBarKind, WaterfallConnector, WaterfallLayout, WaterfallSpan,
    WaterfallStep,
};
use crate::{Error, Result};

/// Folds `steps` into one `{start, end}` span per step.
///
/// For a delta step `end = start + value`. For a checkpoint `start = 0` and `end` is the running
/// total, which the checkpoint leaves unchanged.
pub fn waterfall_cumulative(steps: &[WaterfallStep]) -> Vec<WaterfallSpan> {
    let mut running = 0.0;
    steps
        .iter()
        .map(|step| {
            if step.is_checkpoint() {
                WaterfallSpan {
                    start: 0.0,
                    end: running,
                }
            } else {
                let start = running;
                running += step.value;
                WaterfallSpan {
                    start,
                    end: running,
                }
            }
        })
        .collect()
}

fn validate_steps(steps: &[WaterfallStep]) -> Result<()> {
    if steps.is_empty() {
        return Err(Error::invalid("waterfall needs at least one step"));
    }
    if let Some((idx, step)) = steps
        .iter()
        .enumerate()
        .find(|(_, s)| !s.value.is_finite())
    {
        return Err(Error::invalid(format!(
            "waterfall step {idx} (`{}`) has a non-finite value",
            step.name
        )));
    }
    Ok(())
}

/// Validates `steps` and turns the cumulative spans into drawable bars and connectors.
pub fn layout_waterfall(steps: &[WaterfallStep]) -> Result<WaterfallLayout> {
    validate_steps(steps)?;
    let spans = waterfall_cumulative(steps);
    if let Some(idx) = spans.iter().position(|s| !s.end.is_finite()) {
        return Err(Error::invalid(format!(
            "waterfall running total overflows f64 at step {idx}"
        )));
    }

    let mut total_increase = 0.0;
    let mut total_decrease = 0.0;
    let bars: Vec<WaterfallBar> = steps
        .iter()
        .zip(&spans)
        .map(|(step, span)| {
            let kind = if step.is_total {
                WaterfallBarKind::Total
            } else if step.is_subtotal {
                WaterfallBarKind::Subtotal
            } else if step.value >= 0.0 {
                total_increase += step.value;
                WaterfallBarKind::Increase
            } else {
                total_decrease += -step.value;
                WaterfallBarKind::Decrease
            };
            WaterfallBar {
                name: step.name.clone(),
                kind,
                value: if step.is_checkpoint() {
                    span.end
                } else {
                    step.value
                },
                start: span.start,
                end: span.end,
                base: span.start.min(span.end),
                height: (span.end - span.start).abs(),
            }
        })
        .collect();
    if !total_increase.is_finite() || !total_decrease.is_finite() {
        return Err(Error::invalid("waterfall increase/decrease totals overflow f64"));
    }

    let connectors = spans
        .windows(2)
        .enumerate()
        .map(|(i, pair)| WaterfallConnector {
            from_index: i,
            to_index: i + 1,
            y: pair[0].end,
        })
        .collect();

    let final_total = spans.last().map(|s| s.end).unwrap_or(0.0);
    tracing::debug!(
        steps = steps.len(),
        final_total,
        total_increase,
        total_decrease,
        "waterfall"
    );

    Ok(WaterfallLayout {
        bars,
        connectors,
        final_total,
        total_increase,
        total_decrease,
    })
}
