//! Marimekko (variable-width stacked bar) partitions in a normalized 100x100 space.
//!
//! Column widths follow each category's share of the grand total; inside a column, segments
//! stack top to bottom from `y = 0` by their share of the category total.

use crate::model::{MekkoCategory, MekkoLayout, MekkoRect};
use crate::{Error, Result};
use indexmap::IndexSet;

const SUM_TOLERANCE: f64 = 1e-9;

fn validate(categories: &[MekkoCategory]) -> Result<f64> {
    if categories.is_empty() {
        return Err(Error::invalid("Marimekko chart needs at least one category"));
    }
    for cat in categories {
        if !cat.total.is_finite() || cat.total <= 0.0 {
            return Err(Error::invalid(format!(
                "category `{}` total must be finite and positive, got {}",
                cat.name, cat.total
            )));
        }
        if let Some(seg) = cat
            .segments
            .iter()
            .find(|s| !s.value.is_finite() || s.value < 0.0)
        {
            return Err(Error::invalid(format!(
                "segment `{}` of category `{}` must be finite and non-negative, got {}",
                seg.name, cat.name, seg.value
            )));
        }
    }
    let grand_total: f64 = categories.iter().map(|c| c.total).sum();
    if !grand_total.is_finite() {
        return Err(Error::invalid("Marimekko grand total overflows f64"));
    }
    if grand_total <= 0.0 {
        return Err(Error::invalid("Marimekko grand total must be positive"));
    }
    Ok(grand_total)
}

pub fn layout_mekko(categories: &[MekkoCategory]) -> Result<MekkoLayout> {
    let grand_total = validate(categories)?;

    let segment_names: IndexSet<&str> = categories
        .iter()
        .flat_map(|c| c.segments.iter().map(|s| s.name.as_str()))
        .collect();

    let mut rects = Vec::new();
    let mut x = 0.0;
    for cat in categories {
        let width = cat.total / grand_total * 100.0;

        let seg_sum: f64 = cat.segments.iter().map(|s| s.value).sum();
        if (seg_sum - cat.total).abs() > SUM_TOLERANCE * cat.total.max(1.0) {
            tracing::warn!(
                category = %cat.name,
                total = cat.total,
                segment_sum = seg_sum,
                "segments do not sum to category total; column will not be filled exactly"
            );
        }

        let mut y = 0.0;
        for seg in &cat.segments {
            let height = seg.value / cat.total * 100.0;
            rects.push(MekkoRect {
                x,
                y,
                width,
                height,
                category_name: cat.name.clone(),
                segment_name: seg.name.clone(),
                value: seg.value,
                segment_index: segment_names
                    .get_index_of(seg.name.as_str())
                    .unwrap_or_default(),
                segment_percent: height,
                category_percent: width,
            });
            y += height;
        }
        x += width;
    }

    tracing::debug!(
        categories = categories.len(),
        rects = rects.len(),
        grand_total,
        "mekko layout"
    );

    Ok(MekkoLayout {
        rects,
        segment_names: segment_names.into_iter().map(str::to_string).collect(),
    })
}
