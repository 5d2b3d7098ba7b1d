//! Per-chart tunables.
//!
//! Options are plain structs with `Default` impls. [`ChartConfig::from_value`] overlays an
//! effective-config JSON document on top of those defaults:
//!
//! ```json
//! {
//!   "boxplot":   { "outlierMultiplier": 1.5 },
//!   "histogram": { "binCount": 12, "showDensity": true, "densitySteps": 50 },
//!   "chord":     { "padAngle": 0.04, "innerRadius": 160, "outerRadius": 180 },
//!   "wordCloud": { "minFontSize": 12, "maxFontSize": 48, "width": 600, "height": 400 }
//! }
//! ```
//!
//! Missing keys and keys of the wrong JSON type fall back to the defaults.

use serde_json::Value;

fn config_value<'a>(cfg: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    config_value(cfg, path)?.as_f64()
}

fn config_usize(cfg: &Value, path: &[&str]) -> Option<usize> {
    config_value(cfg, path)?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
}

fn config_bool(cfg: &Value, path: &[&str]) -> Option<bool> {
    config_value(cfg, path)?.as_bool()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlotOptions {
    /// Fence multiplier `k` applied to the IQR.
    pub outlier_multiplier: f64,
}

impl Default for BoxPlotOptions {
    fn default() -> Self {
        Self {
            outlier_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramOptions {
    /// `None` picks `max(ceil(sqrt(n)), 5)`.
    pub bin_count: Option<usize>,
    pub show_density: bool,
    pub density_steps: usize,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            bin_count: None,
            show_density: false,
            density_steps: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordOptions {
    /// Radians of empty arc after each group.
    pub pad_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub label_offset: f64,
    /// Groups spanning less than this many radians get `visible = false` labels.
    pub label_min_span: f64,
}

impl Default for ChordOptions {
    fn default() -> Self {
        Self {
            pad_angle: 0.04,
            inner_radius: 160.0,
            outer_radius: 180.0,
            label_offset: 14.0,
            label_min_span: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordCloudOptions {
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub max_attempts: usize,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            min_font_size: 12.0,
            max_font_size: 48.0,
            width: 600.0,
            height: 400.0,
            margin: 5.0,
            max_attempts: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartConfig {
    pub boxplot: BoxPlotOptions,
    pub histogram: HistogramOptions,
    pub chord: ChordOptions,
    pub word_cloud: WordCloudOptions,
}

impl ChartConfig {
    pub fn from_value(cfg: &Value) -> Self {
        let d = Self::default();

        let boxplot = BoxPlotOptions {
            outlier_multiplier: config_f64(cfg, &["boxplot", "outlierMultiplier"])
                .unwrap_or(d.boxplot.outlier_multiplier),
        };

        let histogram = HistogramOptions {
            bin_count: config_usize(cfg, &["histogram", "binCount"]).or(d.histogram.bin_count),
            show_density: config_bool(cfg, &["histogram", "showDensity"])
                .unwrap_or(d.histogram.show_density),
            density_steps: config_usize(cfg, &["histogram", "densitySteps"])
                .unwrap_or(d.histogram.density_steps),
        };

        let chord = ChordOptions {
            pad_angle: config_f64(cfg, &["chord", "padAngle"]).unwrap_or(d.chord.pad_angle),
            inner_radius: config_f64(cfg, &["chord", "innerRadius"])
                .unwrap_or(d.chord.inner_radius),
            outer_radius: config_f64(cfg, &["chord", "outerRadius"])
                .unwrap_or(d.chord.outer_radius),
            label_offset: config_f64(cfg, &["chord", "labelOffset"])
                .unwrap_or(d.chord.label_offset),
            label_min_span: config_f64(cfg, &["chord", "labelMinSpan"])
                .unwrap_or(d.chord.label_min_span),
        };

        let wc = d.word_cloud;
        let word_cloud = WordCloudOptions {
            min_font_size: config_f64(cfg, &["wordCloud", "minFontSize"])
                .unwrap_or(wc.min_font_size),
            max_font_size: config_f64(cfg, &["wordCloud", "maxFontSize"])
                .unwrap_or(wc.max_font_size),
            width: config_f64(cfg, &["wordCloud", "width"]).unwrap_or(wc.width),
            height: config_f64(cfg, &["wordCloud", "height"]).unwrap_or(wc.height),
            margin: config_f64(cfg, &["wordCloud", "margin"]).unwrap_or(wc.margin),
            max_attempts: config_usize(cfg, &["wordCloud", "maxAttempts"])
                .unwrap_or(wc.max_attempts),
        };

        Self {
            boxplot,
            histogram,
            chord,
            word_cloud,
        }
    }
}
