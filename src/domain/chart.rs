// Chart domain models - input series, options and computed geometry
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: f64 = 400.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesItem {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SeriesItem {
    pub fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default)]
    pub show_values: bool,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            title: None,
            show_legend: true,
            show_values: false,
            width: None,
            height: None,
        }
    }
}

impl ChartOptions {
    pub fn of_kind(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn width(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceShape {
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    pub path: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shapes {
    Bar { bars: Vec<BarShape> },
    Pie { slices: Vec<SliceShape> },
    Doughnut { slices: Vec<SliceShape>, hole: Circle },
    Line { line: Polyline, markers: Vec<Circle> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Output of one render pass. `shapes` is `None` for an empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub shapes: Option<Shapes>,
    pub legend: Vec<LegendEntry>,
    pub value_labels: Vec<ValueLabel>,
}

impl ChartGeometry {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_none()
    }
}
