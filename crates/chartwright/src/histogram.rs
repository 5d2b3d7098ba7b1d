//! Equal-width binning plus an optional Gaussian KDE curve.
//!
//! The density curve shares the histogram's y axis: it is rescaled so its peak equals the
//! tallest bin count.

use crate::config::HistogramOptions;
use crate::model::{Bin, DensityPoint, Histogram};
use crate::{Error, Result, ensure_finite};

const INV_SQRT_TAU: f64 = 0.398_942_280_401_432_7;

/// Upper bound on both the bin count and the number of density samples.
pub const MAX_BINS: usize = 10_000;

/// `max(ceil(sqrt(n)), 5)`.
pub fn default_bin_count(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(5)
}

fn extent(sample: &[f64]) -> (f64, f64) {
    sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// `(min, max - min)`, with a unit range when every value is equal.
fn value_range(sample: &[f64]) -> Result<(f64, f64)> {
    let (min, max) = extent(sample);
    let range = if max > min { max - min } else { 1.0 };
    if !range.is_finite() {
        return Err(Error::invalid(format!(
            "histogram sample range [{min}, {max}] overflows f64"
        )));
    }
    Ok((min, range))
}

/// Bins `sample` into `bin_count` contiguous equal-width bins.
///
/// Every bin is half-open except the last, which also takes the maximum. A sample whose values
/// are all equal gets bins spanning a unit range that starts at that value.
pub fn compute_bins(sample: &[f64], bin_count: usize) -> Result<Vec<Bin>> {
    if sample.is_empty() {
        return Err(Error::invalid("histogram sample is empty"));
    }
    if bin_count == 0 {
        return Err(Error::invalid("histogram bin count must be at least 1"));
    }
    if bin_count > MAX_BINS {
        return Err(Error::invalid(format!(
            "histogram bin count {bin_count} exceeds the maximum of {MAX_BINS}"
        )));
    }
    ensure_finite(sample, "histogram sample")?;

    let (min, range) = value_range(sample)?;
    let width = range / bin_count as f64;
    if width <= 0.0 {
        return Err(Error::invalid(format!(
            "histogram sample range {range} is too narrow for {bin_count} bins"
        )));
    }

    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in sample {
        let idx = ((v - min) / width).floor() as usize;
        bins[idx.min(bin_count - 1)].count += 1;
    }
    Ok(bins)
}

/// Raw Gaussian kernel density of `sample` evaluated at each of `points`.
pub fn gaussian_kde(sample: &[f64], points: &[f64], bandwidth: f64) -> Vec<f64> {
    let n = sample.len() as f64;
    points
        .iter()
        .map(|&x| {
            let sum: f64 = sample
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / bandwidth;
                    (-0.5 * u * u).exp() * INV_SQRT_TAU
                })
                .sum();
            sum / (n * bandwidth)
        })
        .collect()
}

fn density_curve(
    sample: &[f64],
    bin_count: usize,
    steps: usize,
    max_count: usize,
) -> Result<Vec<DensityPoint>> {
    let (min, range) = value_range(sample)?;
    let bandwidth = range / bin_count as f64 * 1.5;

    let xs: Vec<f64> = (0..steps)
        .map(|i| min + (i as f64 / (steps - 1) as f64) * range)
        .collect();
    let densities = gaussian_kde(sample, &xs, bandwidth);

    let peak = densities.iter().copied().fold(0.0_f64, f64::max);
    let scale = if peak > 0.0 {
        max_count as f64 / peak
    } else {
        1.0
    };

    Ok(xs
        .into_iter()
        .zip(densities)
        .map(|(x, d)| DensityPoint { x, y: d * scale })
        .collect())
}

pub fn histogram(sample: &[f64], options: &HistogramOptions) -> Result<Histogram> {
    if sample.is_empty() {
        return Err(Error::invalid("histogram sample is empty"));
    }
    let bin_count = options
        .bin_count
        .unwrap_or_else(|| default_bin_count(sample.len()));
    let bins = compute_bins(sample, bin_count)?;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let bin_width = bins.first().map(|b| b.end - b.start).unwrap_or(0.0);

    let density = if options.show_density && sample.len() >= 2 {
        if options.density_steps < 2 || options.density_steps > MAX_BINS {
            return Err(Error::invalid(format!(
                "density curve needs between 2 and {MAX_BINS} steps, got {}",
                options.density_steps
            )));
        }
        Some(density_curve(
            sample,
            bin_count,
            options.density_steps,
            max_count,
        )?)
    } else {
        None
    };

    tracing::debug!(
        n = sample.len(),
        bin_count,
        max_count,
        density = density.is_some(),
        "histogram"
    );

    Ok(Histogram {
        bins,
        bin_width,
        max_count,
        density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bin_count_has_floor_of_five() {
        assert_eq!(default_bin_count(1), 5);
        assert_eq!(default_bin_count(25), 5);
        assert_eq!(default_bin_count(26), 6);
        assert_eq!(default_bin_count(100), 10);
    }

    #[test]
    fn kernel_peak_matches_standard_normal() {
        let d = gaussian_kde(&[0.0], &[0.0], 1.0);
        assert!((d[0] - INV_SQRT_TAU).abs() < 1e-15);
    }
}
