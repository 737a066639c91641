// Chart renderer - Pure series -> geometry computation for bar, line, pie and doughnut
use crate::domain::chart::{
    BarShape, ChartGeometry, ChartKind, ChartOptions, Circle, LegendEntry, Point, Polyline,
    SeriesItem, Shapes, SliceShape, ValueLabel,
};
use std::f64::consts::PI;

pub const PALETTE: [&str; 8] = [
    "#e91e63", "#9c27b0", "#3f51b5", "#03a9f4", "#009688", "#8bc34a", "#ff9800", "#795548",
];

const PADDING: f64 = 40.0;
const BAR_GAP: f64 = 10.0;
const PIE_MARGIN: f64 = 20.0;
const DOUGHNUT_INNER_RATIO: f64 = 0.6;
const PIE_LABEL_RATIO: f64 = 0.7;
const MARKER_RADIUS: f64 = 4.0;
const LABEL_OFFSET: f64 = 6.0;
const HOLE_COLOR: &str = "#ffffff";

/// Recompute the full geometry for `series`. Empty input yields no shapes.
/// Zero totals and single-point lines are not special-cased and come out as
/// non-finite coordinates.
pub fn render_chart(series: &[SeriesItem], options: &ChartOptions) -> ChartGeometry {
    let width = options.width();
    let height = options.height();
    let colors = assign_colors(series);

    let (shapes, value_labels) = if series.is_empty() {
        (None, Vec::new())
    } else {
        let (shapes, labels) = match options.kind {
            ChartKind::Bar => bar_shapes(series, &colors, width, height),
            ChartKind::Line => line_shapes(series, &colors, width, height),
            ChartKind::Pie => pie_shapes(series, &colors, width, height, false),
            ChartKind::Doughnut => pie_shapes(series, &colors, width, height, true),
        };
        (Some(shapes), if options.show_values { labels } else { Vec::new() })
    };

    let legend = if options.show_legend {
        series
            .iter()
            .zip(&colors)
            .map(|(item, color)| LegendEntry {
                label: item.label.clone(),
                value: format_value(item.value),
                color: color.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ChartGeometry {
        width,
        height,
        title: options.title.clone(),
        shapes,
        legend,
        value_labels,
    }
}

/// Explicit colors win; the rest cycle through the palette by index.
pub fn assign_colors(series: &[SeriesItem]) -> Vec<String> {
    series
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.color
                .clone()
                .unwrap_or_else(|| PALETTE[idx % PALETTE.len()].to_string())
        })
        .collect()
}

pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
            .trim_end_matches('0')
            .to_string()
    }
}

fn max_value(series: &[SeriesItem]) -> f64 {
    series
        .iter()
        .map(|item| item.value)
        .fold(f64::NEG_INFINITY, f64::max)
}

fn bar_shapes(
    series: &[SeriesItem],
    colors: &[String],
    width: f64,
    height: f64,
) -> (Shapes, Vec<ValueLabel>) {
    let slot = width / series.len() as f64;
    let plot_height = height - PADDING * 2.0;
    let max = max_value(series);

    let mut bars = Vec::with_capacity(series.len());
    let mut labels = Vec::with_capacity(series.len());
    for (idx, (item, color)) in series.iter().zip(colors).enumerate() {
        let bar_height = item.value / max * plot_height;
        let x = idx as f64 * slot + BAR_GAP;
        let y = PADDING + plot_height - bar_height;
        let bar_width = slot - BAR_GAP * 2.0;

        labels.push(ValueLabel {
            x: x + bar_width / 2.0,
            y: y - LABEL_OFFSET,
            text: format_value(item.value),
        });
        bars.push(BarShape {
            x,
            y,
            width: bar_width,
            height: bar_height,
            color: color.clone(),
        });
    }

    (Shapes::Bar { bars }, labels)
}

fn line_shapes(
    series: &[SeriesItem],
    colors: &[String],
    width: f64,
    height: f64,
) -> (Shapes, Vec<ValueLabel>) {
    let plot_width = width - PADDING * 2.0;
    let plot_height = height - PADDING * 2.0;
    let step = plot_width / (series.len() - 1) as f64;
    let max = max_value(series);

    let points: Vec<Point> = series
        .iter()
        .enumerate()
        .map(|(idx, item)| Point {
            x: PADDING + idx as f64 * step,
            y: PADDING + plot_height - item.value / max * plot_height,
        })
        .collect();

    let markers = points
        .iter()
        .zip(colors)
        .map(|(p, color)| Circle {
            cx: p.x,
            cy: p.y,
            r: MARKER_RADIUS,
            color: color.clone(),
        })
        .collect();

    let labels = points
        .iter()
        .zip(series)
        .map(|(p, item)| ValueLabel {
            x: p.x,
            y: p.y - MARKER_RADIUS - LABEL_OFFSET,
            text: format_value(item.value),
        })
        .collect();

    // The line takes the first item's color.
    let line = Polyline {
        points,
        color: colors[0].clone(),
    };

    (Shapes::Line { line, markers }, labels)
}

fn pie_shapes(
    series: &[SeriesItem],
    colors: &[String],
    width: f64,
    height: f64,
    doughnut: bool,
) -> (Shapes, Vec<ValueLabel>) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = width.min(height) / 2.0 - PIE_MARGIN;
    let inner = radius * DOUGHNUT_INNER_RATIO;
    let total: f64 = series.iter().map(|item| item.value).sum();
    let label_radius = if doughnut {
        (radius + inner) / 2.0
    } else {
        radius * PIE_LABEL_RATIO
    };

    let mut slices = Vec::with_capacity(series.len());
    let mut labels = Vec::with_capacity(series.len());
    let mut angle = 0.0_f64;
    for (item, color) in series.iter().zip(colors) {
        let sweep = item.value / total * PI * 2.0;
        let start = angle;
        let end = angle + sweep;
        let large_arc = sweep > PI;

        let path = if doughnut {
            ring_path(cx, cy, radius, inner, start, end, large_arc)
        } else {
            wedge_path(cx, cy, radius, start, end, large_arc)
        };

        let mid = start + sweep / 2.0;
        labels.push(ValueLabel {
            x: cx + label_radius * mid.cos(),
            y: cy + label_radius * mid.sin(),
            text: format_value(item.value),
        });
        slices.push(SliceShape {
            start_angle: start,
            end_angle: end,
            large_arc,
            path,
            color: color.clone(),
        });
        angle = end;
    }

    let shapes = if doughnut {
        Shapes::Doughnut {
            slices,
            hole: Circle {
                cx,
                cy,
                r: inner,
                color: HOLE_COLOR.to_string(),
            },
        }
    } else {
        Shapes::Pie { slices }
    };
    (shapes, labels)
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn wedge_path(cx: f64, cy: f64, r: f64, start: f64, end: f64, large_arc: bool) -> String {
    let (x0, y0) = polar(cx, cy, r, start);
    let (x1, y1) = polar(cx, cy, r, end);
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} Z",
        x0,
        y0,
        r,
        r,
        u8::from(large_arc),
        x1,
        y1,
        cx,
        cy
    )
}

fn ring_path(
    cx: f64,
    cy: f64,
    outer: f64,
    inner: f64,
    start: f64,
    end: f64,
    large_arc: bool,
) -> String {
    let (ox0, oy0) = polar(cx, cy, outer, start);
    let (ox1, oy1) = polar(cx, cy, outer, end);
    let (ix1, iy1) = polar(cx, cy, inner, end);
    let (ix0, iy0) = polar(cx, cy, inner, start);
    let flag = u8::from(large_arc);
    format!(
        "M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
        ox0, oy0, outer, outer, flag, ox1, oy1, ix1, iy1, inner, inner, flag, ix0, iy0
    )
}
