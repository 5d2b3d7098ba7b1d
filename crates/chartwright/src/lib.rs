#![forbid(unsafe_code)]

//! Headless geometry and statistics for chart types a generic charting engine cannot draw on
//! its own: box plots, histograms with density curves, chord diagrams, word clouds, Marimekko
//! charts and waterfall series.
//!
//! Every entry point is a pure function over borrowed input that returns owned layout values.
//! Rendering those values is left to the caller.

pub mod boxplot;
pub mod chord;
pub mod config;
pub mod histogram;
pub mod mekko;
pub mod model;
pub mod text;
pub mod waterfall;
pub mod word_cloud;

use crate::config::ChartConfig;
use crate::model::{BoxSeries, ChartLayout, FlowMatrix, MekkoCategory, WaterfallStep, WordItem};
use crate::text::{EstimatedTextMeasurer, TextMeasurer};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("flow matrix has no non-zero flows")]
    EmptyGraph,
    #[error("unsupported chart type for layout: {chart_type}")]
    UnsupportedChart { chart_type: String },
    #[error("chart request JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Chart type tags accepted by [`layout_chart`].
pub const CHART_TYPES: &[&str] = &[
    "boxplot",
    "histogram",
    "waterfall",
    "chord",
    "wordCloud",
    "mekko",
];

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(EstimatedTextMeasurer::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BoxPlotRequest {
    series: Vec<BoxSeries>,
}

#[derive(Debug, Clone, Deserialize)]
struct HistogramRequest {
    data: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct WaterfallRequest {
    steps: Vec<WaterfallStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct WordCloudRequest {
    words: Vec<WordItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct MekkoRequest {
    categories: Vec<MekkoCategory>,
}

/// Lays out a JSON chart request of the shape `{"type": "<tag>", ...}`.
///
/// The remaining fields depend on the tag:
/// - `boxplot`: `series: [{name, data}]`
/// - `histogram`: `data: [number]`
/// - `waterfall`: `steps: [{name, value, isTotal?, isSubtotal?}]`
/// - `chord`: `names: [string]`, `matrix: [[number]]`
/// - `wordCloud`: `words: [{text, weight}]`
/// - `mekko`: `categories: [{name, total, segments: [{name, value}]}]`
///
/// Per-chart tunables come from `config`, never from the request itself.
pub fn layout_chart(
    request: &Value,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    let chart_type = request
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid("chart request is missing a string `type` field"))?;
    tracing::debug!(chart_type, "laying out chart request");

    let layout = match chart_type {
        "boxplot" => {
            let req: BoxPlotRequest = serde_json::from_value(Value::clone(request))?;
            ChartLayout::BoxPlot(boxplot::box_stats_series(&req.series, &config.boxplot)?)
        }
        "histogram" => {
            let req: HistogramRequest = serde_json::from_value(Value::clone(request))?;
            ChartLayout::Histogram(histogram::histogram(&req.data, &config.histogram)?)
        }
        "waterfall" => {
            let req: WaterfallRequest = serde_json::from_value(Value::clone(request))?;
            ChartLayout::Waterfall(waterfall::layout_waterfall(&req.steps)?)
        }
        "chord" => {
            let req: FlowMatrix = serde_json::from_value(Value::clone(request))?;
            ChartLayout::Chord(chord::layout_chord(&req, &config.chord)?)
        }
        "wordCloud" => {
            let req: WordCloudRequest = serde_json::from_value(Value::clone(request))?;
            ChartLayout::WordCloud(word_cloud::layout_word_cloud(
                &req.words,
                &config.word_cloud,
                options.text_measurer.as_ref(),
            )?)
        }
        "mekko" => {
            let req: MekkoRequest = serde_json::from_value(Value::clone(request))?;
            ChartLayout::Mekko(mekko::layout_mekko(&req.categories)?)
        }
        other => {
            return Err(Error::UnsupportedChart {
                chart_type: other.to_string(),
            });
        }
    };

    Ok(layout)
}

pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(Error::invalid(format!(
            "{what} contains a non-finite value at index {idx}"
        ))),
        None => Ok(()),
    }
}

pub(crate) fn f64_cmp(a: &f64, b: &f64) -> std::cmp::Ordering {
    a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
}
