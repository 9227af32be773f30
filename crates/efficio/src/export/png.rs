//! PNG view-sheet rendering.
//!
//! Views are rasterized as line drawings straight into an RGB buffer and
//! composited onto a 2×2 sheet: top and front above, left and isometric
//! below.

use std::path::Path;

use image::{imageops, Rgb, RgbImage};

use super::projection::{self, View};
use crate::{CadError, Shape};

/// Edge length of a single rendered view, in pixels.
pub const VIEW_SIZE: u32 = 800;
/// Blank border kept around each rendered view, in pixels.
const VIEW_MARGIN: f64 = 50.0;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const STROKE: Rgb<u8> = Rgb([0, 0, 0]);

/// Rasterize one projected view into a square image.
pub fn render_view(shape: &Shape, view: View, size: u32) -> Result<RgbImage, CadError> {
    let mesh = shape.to_mesh();
    if mesh.indices.is_empty() {
        return Err(CadError::EmptyGeometry);
    }

    let projected = projection::project(&mesh, view);
    let span = [
        (projected.max[0] - projected.min[0]).max(1e-9),
        (projected.max[1] - projected.min[1]).max(1e-9),
    ];
    let usable = f64::from(size) - 2.0 * VIEW_MARGIN;
    let scale = (usable / span[0]).min(usable / span[1]);
    let offset = [
        VIEW_MARGIN + (usable - span[0] * scale) / 2.0 - projected.min[0] * scale,
        VIEW_MARGIN + (usable - span[1] * scale) / 2.0 - projected.min[1] * scale,
    ];

    let mut img = RgbImage::from_pixel(size, size, BACKGROUND);
    for segment in &projected.segments {
        let a = segment[0];
        let b = segment[1];
        let x0 = (a[0] * scale + offset[0]).round() as i64;
        let y0 = (f64::from(size) - (a[1] * scale + offset[1])).round() as i64;
        let x1 = (b[0] * scale + offset[0]).round() as i64;
        let y1 = (f64::from(size) - (b[1] * scale + offset[1])).round() as i64;
        draw_line(&mut img, x0, y0, x1, y1);
    }
    Ok(img)
}

/// Render the four standard views onto one 2×2 sheet.
pub fn render_views(shape: &Shape) -> Result<RgbImage, CadError> {
    let size = VIEW_SIZE;
    let [top, front, left, iso] = View::sheet();
    let mut sheet = RgbImage::from_pixel(size * 2, size * 2, BACKGROUND);
    imageops::replace(&mut sheet, &render_view(shape, top, size)?, 0, 0);
    imageops::replace(&mut sheet, &render_view(shape, front, size)?, i64::from(size), 0);
    imageops::replace(&mut sheet, &render_view(shape, left, size)?, 0, i64::from(size));
    imageops::replace(
        &mut sheet,
        &render_view(shape, iso, size)?,
        i64::from(size),
        i64::from(size),
    );
    Ok(sheet)
}

/// Write the 2×2 view sheet to a PNG file.
pub fn export_png(shape: &Shape, path: impl AsRef<Path>) -> Result<(), CadError> {
    let sheet = render_views(shape)?;
    sheet.save(path)?;
    Ok(())
}

/// Bresenham line into the buffer, clipped to the image.
fn draw_line(img: &mut RgbImage, mut x0: i64, mut y0: i64, x1: i64, y1: i64) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < img.width() && (y0 as u32) < img.height() {
            img.put_pixel(x0 as u32, y0 as u32, STROKE);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_sheet_dimensions() {
        let cube = Shape::cube(10.0, 20.0, 5.0);
        let sheet = render_views(&cube).unwrap();
        assert_eq!(sheet.width(), VIEW_SIZE * 2);
        assert_eq!(sheet.height(), VIEW_SIZE * 2);
    }

    #[test]
    fn test_view_draws_strokes() {
        let cube = Shape::cube(10.0, 10.0, 10.0);
        let img = render_view(&cube, View::Isometric, 200).unwrap();
        let dark = img.pixels().filter(|p| p.0 == [0, 0, 0]).count();
        assert!(dark > 100, "only {dark} stroke pixels");
    }

    #[test]
    fn test_empty_shape_is_rejected() {
        assert!(matches!(
            render_views(&Shape::empty()),
            Err(CadError::EmptyGeometry)
        ));
    }
}
