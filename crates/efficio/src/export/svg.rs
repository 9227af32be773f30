//! SVG line-drawing export.
//!
//! The markup is written by hand — a projected drawing needs nothing more
//! than a handful of `<line>` elements inside a styled group.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::projection::{self, View};
use crate::{CadError, Shape};

/// Page and stroke settings for SVG output.
#[derive(Debug, Clone, Copy)]
pub struct SvgOptions {
    /// Page width in user units.
    pub width: u32,
    /// Page height in user units.
    pub height: u32,
    /// Blank border kept around the drawing.
    pub margin: f64,
    /// Stroke width for part edges.
    pub stroke_width: f64,
    /// Draw a small projected-axis indicator at the drawing origin.
    pub show_axes: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: 50.0,
            stroke_width: 2.0,
            show_axes: true,
        }
    }
}

/// Map a projected point into page coordinates (Y grows downward in SVG).
struct PageMap {
    scale: f64,
    offset: [f64; 2],
    height: f64,
}

impl PageMap {
    fn new(projected: &projection::Projected, options: &SvgOptions) -> Self {
        let span = [
            (projected.max[0] - projected.min[0]).max(1e-9),
            (projected.max[1] - projected.min[1]).max(1e-9),
        ];
        let usable = [
            f64::from(options.width) - 2.0 * options.margin,
            f64::from(options.height) - 2.0 * options.margin,
        ];
        let scale = (usable[0] / span[0]).min(usable[1] / span[1]);
        let offset = [
            options.margin + (usable[0] - span[0] * scale) / 2.0 - projected.min[0] * scale,
            options.margin + (usable[1] - span[1] * scale) / 2.0 - projected.min[1] * scale,
        ];
        Self {
            scale,
            offset,
            height: f64::from(options.height),
        }
    }

    fn apply(&self, point: [f64; 2]) -> [f64; 2] {
        [
            point[0] * self.scale + self.offset[0],
            self.height - (point[1] * self.scale + self.offset[1]),
        ]
    }
}

/// Render one projected view of a shape as an SVG document.
pub fn to_svg_string(shape: &Shape, view: View, options: &SvgOptions) -> Result<String, CadError> {
    let mesh = shape.to_mesh();
    if mesh.indices.is_empty() {
        return Err(CadError::EmptyGeometry);
    }

    let projected = projection::project(&mesh, view);
    tracing::debug!(segments = projected.segments.len(), ?view, "projected drawing");
    let map = PageMap::new(&projected, options);

    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = options.width,
        h = options.height,
    );

    if options.show_axes {
        let cx = f64::from(options.width) / 2.0;
        let cy = f64::from(options.height) / 2.0;
        let reach = options.margin * 0.8;
        let _ = writeln!(
            out,
            r#"  <g stroke="rgb(160,160,160)" stroke-width="1">"#
        );
        let _ = writeln!(
            out,
            r#"    <line x1="{x1:.2}" y1="{cy:.2}" x2="{x2:.2}" y2="{cy:.2}"/>"#,
            x1 = cx - reach,
            x2 = cx + reach,
        );
        let _ = writeln!(
            out,
            r#"    <line x1="{cx:.2}" y1="{y1:.2}" x2="{cx:.2}" y2="{y2:.2}"/>"#,
            y1 = cy - reach,
            y2 = cy + reach,
        );
        let _ = writeln!(out, r#"  </g>"#);
    }

    let _ = writeln!(
        out,
        r#"  <g stroke="rgb(0,0,0)" stroke-width="{sw}" fill="none" stroke-linecap="round">"#,
        sw = options.stroke_width,
    );
    for segment in &projected.segments {
        let a = map.apply(segment[0]);
        let b = map.apply(segment[1]);
        let _ = writeln!(
            out,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            a[0], a[1], b[0], b[1],
        );
    }
    let _ = writeln!(out, r#"  </g>"#);
    let _ = writeln!(out, r#"</svg>"#);

    Ok(out)
}

/// Write one projected view of a shape to an SVG file.
pub fn export_svg(
    shape: &Shape,
    path: impl AsRef<Path>,
    view: View,
    options: &SvgOptions,
) -> Result<(), CadError> {
    let svg = to_svg_string(shape, view, options)?;
    fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_markup() {
        let cube = Shape::cube(10.0, 20.0, 5.0);
        let svg = to_svg_string(&cube, View::Top, &SvgOptions::default()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains("<line"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_lines_stay_inside_margins() {
        let cube = Shape::cube(30.0, 10.0, 5.0);
        let options = SvgOptions::default();
        let svg = to_svg_string(&cube, View::Top, &options).unwrap();
        for token in svg.split(|c| c == '"') {
            if let Ok(value) = token.parse::<f64>() {
                assert!((-1.0..=801.0).contains(&value), "coordinate {value}");
            }
        }
    }

    #[test]
    fn test_empty_shape_is_rejected() {
        let result = to_svg_string(&Shape::empty(), View::Front, &SvgOptions::default());
        assert!(matches!(result, Err(CadError::EmptyGeometry)));
    }
}
