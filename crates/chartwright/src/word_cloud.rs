//! Greedy spiral placement for word clouds.
//!
//! Words are placed heaviest first. Each word walks an Archimedean spiral out from the canvas
//! centre and takes the first spot where its box stays inside the canvas margin and clears every
//! box placed so far. After `max_attempts` candidates the last one is accepted as-is and the
//! word is flagged `fallback`; dense input can therefore overlap. This is a heuristic, not a
//! packing solver.

use crate::config::WordCloudOptions;
use crate::model::{PlacedWord, WordCloudLayout, WordItem, rects_overlap};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result, f64_cmp};

/// Rotation (degrees) by sorted position, repeating.
const ROTATIONS: [f64; 7] = [0.0, 0.0, 0.0, -15.0, 15.0, -30.0, 30.0];

const INITIAL_ANGLE_STEP: f64 = 0.8;
const ANGLE_STEP: f64 = 0.3;
const RADIUS_STEP_OUT_OF_BOUNDS: f64 = 2.0;
const RADIUS_STEP_COLLISION: f64 = 1.5;

fn validate(words: &[WordItem], options: &WordCloudOptions) -> Result<()> {
    if let Some(w) = words.iter().find(|w| !w.weight.is_finite()) {
        return Err(Error::invalid(format!(
            "word `{}` has a non-finite weight",
            w.text
        )));
    }
    let (lo, hi) = (options.min_font_size, options.max_font_size);
    if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || hi < lo {
        return Err(Error::invalid(format!(
            "font size range must satisfy 0 < min <= max, got {lo}..{hi}"
        )));
    }
    if !(options.width.is_finite() && options.height.is_finite())
        || options.width <= 0.0
        || options.height <= 0.0
    {
        return Err(Error::invalid(format!(
            "word cloud canvas must be positive, got {}x{}",
            options.width, options.height
        )));
    }
    Ok(())
}

/// Linear weight-to-size mapping. Returns `(font_size, normalized_weight)`.
pub fn font_size_for(
    weight: f64,
    min_weight: f64,
    max_weight: f64,
    options: &WordCloudOptions,
) -> (f64, f64) {
    // Halved so the spread of any two finite weights stays finite.
    let (w, lo, hi) = (weight / 2.0, min_weight / 2.0, max_weight / 2.0);
    let range = if hi > lo { hi - lo } else { 1.0 };
    let t = (w - lo) / range;
    (
        options.min_font_size + t * (options.max_font_size - options.min_font_size),
        t,
    )
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

fn in_bounds(r: &Rect, options: &WordCloudOptions) -> bool {
    let m = options.margin;
    r.x >= m && r.x + r.w <= options.width - m && r.y >= m && r.y + r.h <= options.height - m
}

/// Walks the spiral for one box. Returns the accepted top-left corner and whether the retry
/// budget ran out.
fn place(
    index: usize,
    w: f64,
    h: f64,
    placed: &[Rect],
    options: &WordCloudOptions,
) -> (f64, f64, bool) {
    let cx = options.width / 2.0;
    let cy = options.height / 2.0;
    let mut angle = index as f64 * INITIAL_ANGLE_STEP;
    let mut radius = 0.0;
    let mut candidate = Rect {
        x: cx - w / 2.0,
        y: cy - h / 2.0,
        w,
        h,
    };

    for _ in 0..options.max_attempts.max(1) {
        candidate.x = cx + radius * angle.cos() - w / 2.0;
        candidate.y = cy + radius * angle.sin() - h / 2.0;

        if !in_bounds(&candidate, options) {
            angle += ANGLE_STEP;
            radius += RADIUS_STEP_OUT_OF_BOUNDS;
            continue;
        }

        let collides = placed.iter().any(|r| {
            rects_overlap(
                (candidate.x, candidate.y, candidate.w, candidate.h),
                (r.x, r.y, r.w, r.h),
            )
        });
        if !collides {
            return (candidate.x, candidate.y, false);
        }
        angle += ANGLE_STEP;
        radius += RADIUS_STEP_COLLISION;
    }

    (candidate.x, candidate.y, true)
}

pub fn layout_word_cloud(
    words: &[WordItem],
    options: &WordCloudOptions,
    measurer: &dyn TextMeasurer,
) -> Result<WordCloudLayout> {
    validate(words, options)?;

    let mut sorted: Vec<&WordItem> = words.iter().collect();
    sorted.sort_by(|a, b| f64_cmp(&b.weight, &a.weight));

    let max_weight = sorted.first().map(|w| w.weight).unwrap_or(0.0);
    let min_weight = sorted.last().map(|w| w.weight).unwrap_or(0.0);

    let mut placed_rects: Vec<Rect> = Vec::with_capacity(sorted.len());
    let mut out = Vec::with_capacity(sorted.len());

    for (i, item) in sorted.into_iter().enumerate() {
        let (font_size, t) = font_size_for(item.weight, min_weight, max_weight, options);
        let bold = font_size > options.max_font_size * 0.6;
        let metrics = measurer.measure(&item.text, &TextStyle { font_size, bold });

        let (x, y, fallback) = place(i, metrics.width, metrics.height, &placed_rects, options);
        if fallback {
            tracing::warn!(
                word = %item.text,
                attempts = options.max_attempts,
                "word cloud placement exhausted retries; accepting last candidate"
            );
        }
        placed_rects.push(Rect {
            x,
            y,
            w: metrics.width,
            h: metrics.height,
        });

        out.push(PlacedWord {
            text: item.text.clone(),
            weight: item.weight,
            font_size,
            x,
            y,
            width: metrics.width,
            height: metrics.height,
            rotation: ROTATIONS[i % ROTATIONS.len()],
            opacity: 0.6 + t * 0.4,
            bold,
            fallback,
        });
    }

    tracing::debug!(
        words = out.len(),
        fallbacks = out.iter().filter(|w| w.fallback).count(),
        "word cloud"
    );

    Ok(WordCloudLayout {
        width: options.width,
        height: options.height,
        words: out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weights_map_to_min_font_size() {
        let opts = WordCloudOptions::default();
        assert_eq!(font_size_for(3.0, 3.0, 3.0, &opts), (12.0, 0.0));
    }

    #[test]
    fn heaviest_word_gets_max_font_size() {
        let opts = WordCloudOptions::default();
        let (size, t) = font_size_for(10.0, 0.0, 10.0, &opts);
        assert_eq!(size, 48.0);
        assert_eq!(t, 1.0);
    }

    #[test]
    fn first_word_lands_centered() {
        let opts = WordCloudOptions::default();
        let (x, y, fallback) = place(0, 100.0, 20.0, &[], &opts);
        assert!(!fallback);
        assert_eq!((x, y), (250.0, 190.0));
    }

    #[test]
    fn oversized_box_falls_back() {
        let opts = WordCloudOptions::default();
        let (_, _, fallback) = place(0, 1000.0, 20.0, &[], &opts);
        assert!(fallback);
    }
}
