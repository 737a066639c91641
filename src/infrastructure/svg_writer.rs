// SVG serialisation of computed chart geometry
use crate::domain::chart::{ChartGeometry, Circle, Shapes};

const LEGEND_WIDTH: f64 = 160.0;
const LEGEND_ROW: f64 = 22.0;
const SWATCH: f64 = 12.0;
const FONT: &str = "font-family=\"Helvetica, Arial, sans-serif\"";

pub fn write_svg(geometry: &ChartGeometry) -> String {
    let total_width = if geometry.legend.is_empty() {
        geometry.width
    } else {
        geometry.width + LEGEND_WIDTH
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" viewBox=\"0 0 {w:.2} {h:.2}\">",
        w = total_width,
        h = geometry.height
    ));

    if let Some(title) = &geometry.title {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"20\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\" {}>{}</text>",
            geometry.width / 2.0,
            FONT,
            escape_xml(title)
        ));
    }

    match &geometry.shapes {
        Some(Shapes::Bar { bars }) => {
            for bar in bars {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
                    bar.x,
                    bar.y,
                    bar.width,
                    bar.height,
                    escape_xml(&bar.color)
                ));
            }
        }
        Some(Shapes::Pie { slices }) | Some(Shapes::Doughnut { slices, .. }) => {
            for slice in slices {
                svg.push_str(&format!(
                    "<path d=\"{}\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"1\"/>",
                    slice.path,
                    escape_xml(&slice.color)
                ));
            }
            if let Some(Shapes::Doughnut { hole, .. }) = &geometry.shapes {
                write_circle(&mut svg, hole);
            }
        }
        Some(Shapes::Line { line, markers }) => {
            let points: Vec<String> = line
                .points
                .iter()
                .map(|p| format!("{:.2},{:.2}", p.x, p.y))
                .collect();
            svg.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
                points.join(" "),
                escape_xml(&line.color)
            ));
            for marker in markers {
                write_circle(&mut svg, marker);
            }
        }
        None => {}
    }

    for label in &geometry.value_labels {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"11\" {}>{}</text>",
            label.x,
            label.y,
            FONT,
            escape_xml(&label.text)
        ));
    }

    let legend_x = geometry.width + 10.0;
    for (idx, entry) in geometry.legend.iter().enumerate() {
        let y = 40.0 + idx as f64 * LEGEND_ROW;
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            legend_x,
            y,
            SWATCH,
            SWATCH,
            escape_xml(&entry.color)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" {}>{} ({})</text>",
            legend_x + SWATCH + 6.0,
            y + SWATCH - 1.0,
            FONT,
            escape_xml(&entry.label),
            escape_xml(&entry.value)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn write_circle(svg: &mut String, circle: &Circle) {
    svg.push_str(&format!(
        "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
        circle.cx,
        circle.cy,
        circle.r,
        escape_xml(&circle.color)
    ));
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
