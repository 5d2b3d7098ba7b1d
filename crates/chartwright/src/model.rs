use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl LayoutPoint {
    /// Polar to cartesian around the origin; angle 0 points along +x and grows towards +y.
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }
}

// ---------------------------------------------------------------------------------------------
// Box plot

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSeries {
    pub name: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStats {
    /// Lower whisker end: the smallest value inside the fences.
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Upper whisker end: the largest value inside the fences.
    pub max: f64,
    /// Mean of the full sample, outliers included.
    pub mean: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub count: usize,
    /// Values beyond the fences, ascending.
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedBoxStats {
    pub name: String,
    #[serde(flatten)]
    pub stats: BoxStats,
}

// ---------------------------------------------------------------------------------------------
// Histogram

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub bin_width: f64,
    pub max_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<Vec<DensityPoint>>,
}

// ---------------------------------------------------------------------------------------------
// Waterfall

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallStep {
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub is_total: bool,
    #[serde(default)]
    pub is_subtotal: bool,
}

impl WaterfallStep {
    pub fn delta(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            is_total: false,
            is_subtotal: false,
        }
    }

    pub fn total(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            is_total: true,
            is_subtotal: false,
        }
    }

    pub fn subtotal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0.0,
            is_total: false,
            is_subtotal: true,
        }
    }

    pub fn is_checkpoint(&self) -> bool {
        self.is_total || self.is_subtotal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterfallSpan {
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaterfallBarKind {
    Increase,
    Decrease,
    Total,
    Subtotal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallBar {
    pub name: String,
    pub kind: WaterfallBarKind,
    pub value: f64,
    pub start: f64,
    pub end: f64,
    /// Bottom edge of the visible bar.
    pub base: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallConnector {
    pub from_index: usize,
    pub to_index: usize,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallLayout {
    pub bars: Vec<WaterfallBar>,
    pub connectors: Vec<WaterfallConnector>,
    pub final_total: f64,
    pub total_increase: f64,
    pub total_decrease: f64,
}

// ---------------------------------------------------------------------------------------------
// Chord

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowMatrix {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordGroup {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEnd {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub source: ChordEnd,
    pub target: ChordEnd,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordLabel {
    pub index: usize,
    pub name: String,
    pub mid_angle: f64,
    pub x: f64,
    pub y: f64,
    pub anchor: TextAnchor,
    pub visible: bool,
}

/// Endpoints of one ribbon on the inner radius. Both sides are joined through `control` with a
/// quadratic curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonGeometry {
    pub source_start: LayoutPoint,
    pub source_end: LayoutPoint,
    pub target_start: LayoutPoint,
    pub target_end: LayoutPoint,
    pub control: LayoutPoint,
    pub source_large_arc: bool,
    pub target_large_arc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordLayout {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub pad_angle: f64,
    pub groups: Vec<ChordGroup>,
    pub chords: Vec<Chord>,
    pub ribbons: Vec<RibbonGeometry>,
    pub labels: Vec<ChordLabel>,
}

// ---------------------------------------------------------------------------------------------
// Word cloud

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    pub text: String,
    pub weight: f64,
}

impl WordItem {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub text: String,
    pub weight: f64,
    pub font_size: f64,
    /// Top-left corner of the estimated bounding box.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees.
    pub rotation: f64,
    pub opacity: f64,
    pub bold: bool,
    /// Set when no collision-free spot was found within the retry budget.
    pub fallback: bool,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        rects_overlap(
            (self.x, self.y, self.width, self.height),
            (other.x, other.y, other.width, other.height),
        )
    }
}

pub(crate) fn rects_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
    let (ax, ay, aw, ah) = a;
    let (bx, by, bw, bh) = b;
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudLayout {
    pub width: f64,
    pub height: f64,
    pub words: Vec<PlacedWord>,
}

// ---------------------------------------------------------------------------------------------
// Marimekko

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MekkoSegment {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MekkoCategory {
    pub name: String,
    pub total: f64,
    pub segments: Vec<MekkoSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MekkoRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub category_name: String,
    pub segment_name: String,
    pub value: f64,
    pub segment_index: usize,
    pub segment_percent: f64,
    pub category_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MekkoLayout {
    pub rects: Vec<MekkoRect>,
    pub segment_names: Vec<String>,
}

// ---------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "layout")]
pub enum ChartLayout {
    #[serde(rename = "boxplot")]
    BoxPlot(Vec<NamedBoxStats>),
    #[serde(rename = "histogram")]
    Histogram(Histogram),
    #[serde(rename = "waterfall")]
    Waterfall(WaterfallLayout),
    #[serde(rename = "chord")]
    Chord(ChordLayout),
    #[serde(rename = "wordCloud")]
    WordCloud(WordCloudLayout),
    #[serde(rename = "mekko")]
    Mekko(MekkoLayout),
}
