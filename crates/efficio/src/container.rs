//! A hollow rounded-edge box with a split-off lid and an embedded bolt
//! channel.
//!
//! The box is built centered on the origin, hollowed by subtracting an inner
//! rounded box, fitted with an M3 bolt channel through its floor, then split
//! into a lid slab and a body. The lid is flipped and parked next to the body
//! so the result prints as one plate.

use crate::fasteners::M3BoltChannel;
use crate::shape::{Shape, DEFAULT_SEGMENTS};
use crate::{rounded_cube, CadError, Length, Object};

/// Edge fillet radius, in mm.
pub const BOX_FILLET_RADIUS_MM: f64 = 3.0;
/// Lid slab height, in mm.
pub const BOX_LID_HEIGHT_MM: f64 = 3.0;
/// Wall thickness, in mm.
pub const BOX_WALL_THICKNESS_MM: f64 = 2.0;
/// Gap between the body and the parked lid, in mm.
pub const PART_SPACING_MM: f64 = 1.0;

/// A hollow rounded box with a removable lid.
///
/// All three dimensions must exceed twice the wall thickness plus twice the
/// fillet radius, or construction fails with an invalid-parameter error.
#[derive(Debug, Clone, Copy)]
pub struct RoundedBox {
    /// Outer extent along X.
    pub width: Length,
    /// Outer extent along Y.
    pub length: Length,
    /// Outer extent along Z.
    pub depth: Length,
}

impl RoundedBox {
    /// A rounded box from its outer extents.
    pub fn new(width: Length, length: Length, depth: Length) -> Self {
        Self {
            width,
            length,
            depth,
        }
    }

    fn hollow_body(&self) -> Result<Shape, CadError> {
        let (w, l, d) = (self.width.mm(), self.length.mm(), self.depth.mm());
        let wall_offset = BOX_WALL_THICKNESS_MM * 2.0;

        let outer = rounded_cube(w, l, d, BOX_FILLET_RADIUS_MM, DEFAULT_SEGMENTS)?
            .translate(-w / 2.0, -l / 2.0, -d / 2.0);
        let inner = rounded_cube(
            w - wall_offset,
            l - wall_offset,
            d - wall_offset,
            BOX_FILLET_RADIUS_MM,
            DEFAULT_SEGMENTS,
        )?
        .translate(
            -(w - wall_offset) / 2.0,
            -(l - wall_offset) / 2.0,
            -(d - wall_offset) / 2.0,
        );
        Ok(outer.difference(&inner))
    }
}

impl Object for RoundedBox {
    fn shape(&self) -> Result<Shape, CadError> {
        let (w, d) = (self.width.mm(), self.depth.mm());
        let mut hollow = self.hollow_body()?;

        // Bolt channel through the floor, centered on the box axis.
        let channel = M3BoltChannel::new(self.depth)?;
        if let Some(channel_cut) = channel.cut()? {
            hollow = hollow.difference(&channel_cut.translate(0.0, 0.0, -d / 2.0));
        }
        hollow = hollow.union(&channel.shape()?.translate(0.0, 0.0, -d / 2.0));

        // Split the lid off, flip it over and park it beside the body.
        let lid_offset = (d - BOX_LID_HEIGHT_MM) / 2.0;
        let lid = hollow
            .slice_top(BOX_LID_HEIGHT_MM)?
            .translate(0.0, 0.0, -lid_offset)
            .rotate(180.0, 0.0, 0.0)
            .translate(w + PART_SPACING_MM, 0.0, -lid_offset);
        let body = hollow.slice_bottom(d - BOX_LID_HEIGHT_MM)?;

        Ok(body.union(&lid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rounded_box_layout() {
        let container = RoundedBox::new(
            Length::millimeters(30.0),
            Length::millimeters(20.0),
            Length::millimeters(15.0),
        );
        let bounds = container.shape().unwrap().bounds().unwrap();
        // Body plus the parked lid, one spacing gap apart.
        assert_relative_eq!(
            bounds.size()[0],
            2.0 * 30.0 + PART_SPACING_MM,
            epsilon = 0.01
        );
        assert_relative_eq!(bounds.size()[1], 20.0, epsilon = 0.01);
        // Both pieces sit below the original lid line.
        assert_relative_eq!(
            bounds.size()[2],
            15.0 - BOX_LID_HEIGHT_MM,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_hollowing_removes_volume() {
        let container = RoundedBox::new(
            Length::millimeters(30.0),
            Length::millimeters(20.0),
            Length::millimeters(15.0),
        );
        let shape = container.shape().unwrap();
        let solid_volume = 30.0 * 20.0 * 15.0;
        assert!(shape.volume() < solid_volume * 0.8);
        assert!(shape.volume() > 0.0);
    }

    #[test]
    fn test_undersized_box_is_rejected() {
        let tiny = RoundedBox::new(
            Length::millimeters(8.0),
            Length::millimeters(8.0),
            Length::millimeters(8.0),
        );
        assert!(tiny.shape().is_err());
    }
}
