//! Push-button blanks: a cylindrical cap over a narrower stem.
//!
//! Unlike the M3 fasteners these are fully parametric; the clearance flag
//! serves the same purpose (subtract the grown part from a housing to leave a
//! working cavity).

use crate::shape::{Shape, DEFAULT_SEGMENTS};
use crate::{CadError, Length, Object};

/// Radial print clearance applied when `has_clearance` is set, in mm.
pub const BUTTON_CLEARANCE_MM: f64 = 0.20;

/// The stem of a push button.
#[derive(Debug, Clone, Copy)]
pub struct ButtonShaft {
    length: Length,
    diameter: Length,
    has_clearance: bool,
}

impl ButtonShaft {
    /// A stem of the given length and diameter.
    pub fn new(length: Length, diameter: Length, has_clearance: bool) -> Self {
        Self {
            length,
            diameter,
            has_clearance,
        }
    }

    /// The stem length.
    pub fn length(&self) -> Length {
        self.length
    }

    fn clearance(&self) -> f64 {
        if self.has_clearance {
            BUTTON_CLEARANCE_MM
        } else {
            0.0
        }
    }
}

impl Object for ButtonShaft {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::cylinder(
            self.diameter.mm() / 2.0 + self.clearance(),
            self.length.mm(),
            DEFAULT_SEGMENTS,
        ))
    }
}

/// The cap of a push button.
#[derive(Debug, Clone, Copy)]
pub struct ButtonHead {
    height: Length,
    diameter: Length,
    has_clearance: bool,
}

impl ButtonHead {
    /// A cap of the given height and diameter.
    pub fn new(height: Length, diameter: Length, has_clearance: bool) -> Self {
        Self {
            height,
            diameter,
            has_clearance,
        }
    }

    /// The cap height.
    pub fn height(&self) -> Length {
        self.height
    }

    fn clearance(&self) -> f64 {
        if self.has_clearance {
            BUTTON_CLEARANCE_MM
        } else {
            0.0
        }
    }
}

impl Object for ButtonHead {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::cylinder(
            self.diameter.mm() / 2.0 + self.clearance(),
            self.height.mm(),
            DEFAULT_SEGMENTS,
        ))
    }
}

/// A complete push button: cap on the XY plane, stem above it.
#[derive(Debug, Clone, Copy)]
pub struct Button {
    /// The cap.
    pub head: ButtonHead,
    /// The stem.
    pub shaft: ButtonShaft,
}

impl Button {
    /// A button from cap and stem dimensions.
    pub fn new(
        head_height: Length,
        head_diameter: Length,
        shaft_length: Length,
        shaft_diameter: Length,
        has_clearance: bool,
    ) -> Self {
        Self {
            head: ButtonHead::new(head_height, head_diameter, has_clearance),
            shaft: ButtonShaft::new(shaft_length, shaft_diameter, has_clearance),
        }
    }
}

impl Object for Button {
    fn shape(&self) -> Result<Shape, CadError> {
        let head = self.head.shape()?;
        let shaft = self
            .shaft
            .shape()?
            .translate(0.0, 0.0, self.head.height().mm());
        Ok(head.union(&shaft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_button_stacks_shaft_on_head() {
        let button = Button::new(
            Length::millimeters(2.0),
            Length::millimeters(12.0),
            Length::millimeters(6.0),
            Length::millimeters(4.0),
            false,
        );
        let bounds = button.shape().unwrap().bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 12.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.min[2], 0.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_button_clearance() {
        let snug = Button::new(
            Length::millimeters(2.0),
            Length::millimeters(12.0),
            Length::millimeters(6.0),
            Length::millimeters(4.0),
            true,
        );
        let bounds = snug.shape().unwrap().bounds().unwrap();
        assert_relative_eq!(
            bounds.size()[0],
            12.0 + 2.0 * BUTTON_CLEARANCE_MM,
            epsilon = 1e-4
        );
    }
}
