//! Five-number summaries for box-and-whisker plots.
//!
//! Quartiles use nearest rank at `floor(n * p)` on the sorted sample rather than linear
//! interpolation, so every quartile is an actual sample value. The median follows the usual
//! odd/even rule.

use crate::config::BoxPlotOptions;
use crate::model::{BoxSeries, BoxStats, NamedBoxStats};
use crate::{Error, Result, ensure_finite, f64_cmp};

fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let idx = ((n as f64) * p).floor() as usize;
    sorted[idx.min(n - 1)]
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 0 {
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    }
}

/// Computes the box statistics of one sample.
///
/// `min`/`max` are whisker ends (the extreme values inside the fences), not the absolute
/// extremes; if nothing lies inside the fences they fall back to the sorted extremes.
pub fn box_stats(sample: &[f64], options: &BoxPlotOptions) -> Result<BoxStats> {
    if sample.is_empty() {
        return Err(Error::invalid("box plot sample is empty"));
    }
    ensure_finite(sample, "box plot sample")?;
    let k = options.outlier_multiplier;
    if !k.is_finite() || k < 0.0 {
        return Err(Error::invalid(format!(
            "outlier multiplier must be finite and non-negative, got {k}"
        )));
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64_cmp);
    let n = sorted.len();

    let q1 = nearest_rank(&sorted, 0.25);
    let median = median_of_sorted(&sorted);
    let q3 = nearest_rank(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - k * iqr;
    let upper_fence = q3 + k * iqr;
    if !lower_fence.is_finite() || !upper_fence.is_finite() {
        return Err(Error::invalid(format!(
            "box plot spread overflows f64 (q1={q1}, q3={q3}, k={k})"
        )));
    }

    let (in_range, outliers): (Vec<f64>, Vec<f64>) = sorted
        .iter()
        .copied()
        .partition(|&v| v >= lower_fence && v <= upper_fence);

    let min = in_range.first().copied().unwrap_or(sorted[0]);
    let max = in_range.last().copied().unwrap_or(sorted[n - 1]);
    let mean: f64 = sample.iter().map(|v| v / n as f64).sum();

    tracing::debug!(n, q1, median, q3, outliers = outliers.len(), "box stats");

    Ok(BoxStats {
        min,
        q1,
        median,
        q3,
        max,
        mean,
        iqr,
        lower_fence,
        upper_fence,
        count: n,
        outliers,
    })
}

/// One summary per named series, in input order.
pub fn box_stats_series(
    series: &[BoxSeries],
    options: &BoxPlotOptions,
) -> Result<Vec<NamedBoxStats>> {
    if series.is_empty() {
        return Err(Error::invalid("box plot needs at least one series"));
    }
    series
        .iter()
        .map(|s| {
            let stats = box_stats(&s.data, options).map_err(|err| match err {
                Error::InvalidInput { message } => Error::InvalidInput {
                    message: format!("series `{}`: {message}", s.name),
                },
                other => other,
            })?;
            Ok(NamedBoxStats {
                name: s.name.clone(),
                stats,
            })
        })
        .collect()
}
