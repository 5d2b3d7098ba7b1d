//! Chord diagram layout from a square flow matrix.
//!
//! Groups are laid out clockwise from angle 0, each followed by `pad_angle` of empty arc, with
//! the remaining circle shared in proportion to each group's outgoing total (its row sum).
//!
//! Every non-zero matrix entry becomes its own chord; self-loops and the two directions of an
//! asymmetric pair are not merged. Each group keeps two cursors that only move forward: one
//! hands out sub-arcs to chords leaving the group, the other to chords entering it. Outgoing
//! sub-arcs are sized by `value / row_total` and incoming ones by `value / column_total`, so each
//! family tiles the group's arc exactly once and no two chords of the same family overlap.
//! For a symmetric matrix the column totals equal the row totals, so both families are sized by
//! the group total.

use crate::config::ChordOptions;
use crate::model::{
    Chord, ChordEnd, ChordGroup, ChordLabel, ChordLayout, FlowMatrix, LayoutPoint,
    RibbonGeometry, TextAnchor,
};
use crate::{Error, Result};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn validate_matrix(input: &FlowMatrix) -> Result<usize> {
    let n = input.names.len();
    if n == 0 {
        return Err(Error::invalid("chord diagram needs at least one group"));
    }
    if input.matrix.len() != n {
        return Err(Error::invalid(format!(
            "flow matrix has {} rows but there are {n} names",
            input.matrix.len()
        )));
    }
    for (i, row) in input.matrix.iter().enumerate() {
        if row.len() != n {
            return Err(Error::invalid(format!(
                "flow matrix row {i} has {} columns, expected {n}",
                row.len()
            )));
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::invalid(format!(
                "flow matrix entry [{i}][{j}] must be finite and non-negative, got {}",
                row[j]
            )));
        }
    }
    Ok(n)
}

fn validate_pad_angle(n: usize, pad: f64) -> Result<()> {
    if !pad.is_finite() || pad < 0.0 || (n as f64) * pad >= TAU {
        return Err(Error::invalid(format!(
            "pad angle {pad} leaves no usable arc for {n} groups"
        )));
    }
    Ok(())
}

fn validate_radii(options: &ChordOptions) -> Result<()> {
    let (inner, outer) = (options.inner_radius, options.outer_radius);
    if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || outer < inner {
        return Err(Error::invalid(format!(
            "chord radii must satisfy 0 <= inner <= outer, got inner={inner} outer={outer}"
        )));
    }
    Ok(())
}

/// Computes group sectors and one chord per non-zero flow.
///
/// Fails with [`Error::EmptyGraph`] when every flow is zero.
pub fn chord_groups_and_chords(
    input: &FlowMatrix,
    pad_angle: f64,
) -> Result<(Vec<ChordGroup>, Vec<Chord>)> {
    let n = validate_matrix(input)?;
    validate_pad_angle(n, pad_angle)?;
    let matrix = &input.matrix;

    let row_totals: Vec<f64> = matrix.iter().map(|row| row.iter().sum()).collect();
    let col_totals: Vec<f64> = (0..n)
        .map(|j| matrix.iter().map(|row| row[j]).sum())
        .collect();
    let grand_total: f64 = row_totals.iter().sum();
    let overflowed = row_totals
        .iter()
        .chain(&col_totals)
        .chain(std::iter::once(&grand_total))
        .any(|t| !t.is_finite());
    if overflowed {
        return Err(Error::invalid("flow matrix totals overflow f64"));
    }
    if grand_total <= 0.0 {
        return Err(Error::EmptyGraph);
    }

    let usable = TAU - n as f64 * pad_angle;
    let mut groups = Vec::with_capacity(n);
    let mut angle = 0.0;
    for (index, &total) in row_totals.iter().enumerate() {
        let span = total / grand_total * usable;
        groups.push(ChordGroup {
            index,
            start_angle: angle,
            end_angle: angle + span,
            total,
        });
        angle += span + pad_angle;
    }

    let mut out_cursor: Vec<f64> = groups.iter().map(|g| g.start_angle).collect();
    let mut in_cursor = out_cursor.clone();
    let mut chords = Vec::new();

    for (i, row) in matrix.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            if value <= 0.0 {
                continue;
            }
            let source_span =
                value / row_totals[i] * (groups[i].end_angle - groups[i].start_angle);
            let target_span =
                value / col_totals[j] * (groups[j].end_angle - groups[j].start_angle);

            let source = ChordEnd {
                index: i,
                start_angle: out_cursor[i],
                end_angle: out_cursor[i] + source_span,
            };
            let target = ChordEnd {
                index: j,
                start_angle: in_cursor[j],
                end_angle: in_cursor[j] + target_span,
            };
            out_cursor[i] = source.end_angle;
            in_cursor[j] = target.end_angle;

            chords.push(Chord {
                source,
                target,
                value,
            });
        }
    }

    tracing::debug!(
        groups = n,
        chords = chords.len(),
        grand_total,
        "chord layout"
    );
    Ok((groups, chords))
}

pub fn ribbon_geometry(chord: &Chord, radius: f64) -> RibbonGeometry {
    let s = &chord.source;
    let t = &chord.target;
    RibbonGeometry {
        source_start: LayoutPoint::from_polar(radius, s.start_angle),
        source_end: LayoutPoint::from_polar(radius, s.end_angle),
        target_start: LayoutPoint::from_polar(radius, t.start_angle),
        target_end: LayoutPoint::from_polar(radius, t.end_angle),
        control: LayoutPoint { x: 0.0, y: 0.0 },
        source_large_arc: s.end_angle - s.start_angle > PI,
        target_large_arc: t.end_angle - t.start_angle > PI,
    }
}

pub fn group_label(group: &ChordGroup, name: &str, options: &ChordOptions) -> ChordLabel {
    let mid_angle = (group.start_angle + group.end_angle) / 2.0;
    let at = LayoutPoint::from_polar(options.outer_radius + options.label_offset, mid_angle);
    let anchor = if mid_angle > FRAC_PI_2 && mid_angle < 3.0 * FRAC_PI_2 {
        TextAnchor::End
    } else {
        TextAnchor::Start
    };
    ChordLabel {
        index: group.index,
        name: name.to_string(),
        mid_angle,
        x: at.x,
        y: at.y,
        anchor,
        visible: group.end_angle - group.start_angle > options.label_min_span,
    }
}

/// Full chord layout: sectors, chords, ribbon endpoints and group labels.
pub fn layout_chord(input: &FlowMatrix, options: &ChordOptions) -> Result<ChordLayout> {
    validate_radii(options)?;
    let (groups, chords) = chord_groups_and_chords(input, options.pad_angle)?;

    let ribbons = chords
        .iter()
        .map(|c| ribbon_geometry(c, options.inner_radius))
        .collect();
    let labels = groups
        .iter()
        .zip(&input.names)
        .map(|(g, name)| group_label(g, name, options))
        .collect();

    Ok(ChordLayout {
        inner_radius: options.inner_radius,
        outer_radius: options.outer_radius,
        pad_angle: options.pad_angle,
        groups,
        chords,
        ribbons,
        labels,
    })
}
