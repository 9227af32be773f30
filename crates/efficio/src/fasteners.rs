//! M3 hardware fasteners: bolt, hex nut, bolt+nut assembly, clearance
//! channel.
//!
//! Dimensions follow the ISO M3 pan-head convention used for printed parts.
//! Every part takes a `has_clearance` flag; when set, radial dimensions grow
//! by the print clearance so the part can be subtracted from a host solid to
//! leave a working cavity.

use crate::primitives::Cylinder;
use crate::shape::{Shape, DEFAULT_SEGMENTS};
use crate::{CadError, Length, Object};

/// Radial print clearance applied when `has_clearance` is set, in mm.
pub const M3_BOLT_CLEARANCE_MM: f64 = 0.20;
/// Bolt shaft radius, in mm.
pub const M3_SHAFT_RADIUS_MM: f64 = 3.0 / 2.0;
/// Bolt head height, in mm.
pub const M3_HEAD_HEIGHT_MM: f64 = 3.0;
/// Bolt head radius, in mm.
pub const M3_HEAD_RADIUS_MM: f64 = 5.5 / 2.0;
/// Nut width across flats, in mm.
pub const M3_NUT_WAF_MM: f64 = 5.5;
/// Nut width across corners, in mm.
pub const M3_NUT_WAC_MM: f64 = 6.35;
/// Nut height, in mm.
pub const M3_NUT_HEIGHT_MM: f64 = 2.4;
/// Radial padding around a bolt channel column, in mm.
pub const M3_CHANNEL_PADDING_MM: f64 = 0.5;

/// The cylindrical shaft of an M3 bolt.
#[derive(Debug, Clone, Copy)]
pub struct M3BoltShaft {
    length: Length,
    has_clearance: bool,
}

impl M3BoltShaft {
    /// A shaft of the given length.
    pub fn new(length: Length, has_clearance: bool) -> Self {
        Self {
            length,
            has_clearance,
        }
    }

    /// The shaft length.
    pub fn length(&self) -> Length {
        self.length
    }

    fn clearance(&self) -> f64 {
        if self.has_clearance {
            M3_BOLT_CLEARANCE_MM
        } else {
            0.0
        }
    }
}

impl Object for M3BoltShaft {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::cylinder(
            M3_SHAFT_RADIUS_MM + self.clearance(),
            self.length.mm(),
            DEFAULT_SEGMENTS,
        ))
    }
}

/// The pan head of an M3 bolt.
#[derive(Debug, Clone, Copy)]
pub struct M3BoltHead {
    has_clearance: bool,
}

impl M3BoltHead {
    /// A bolt head.
    pub fn new(has_clearance: bool) -> Self {
        Self { has_clearance }
    }

    fn clearance(&self) -> f64 {
        if self.has_clearance {
            M3_BOLT_CLEARANCE_MM
        } else {
            0.0
        }
    }
}

impl Object for M3BoltHead {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::cylinder(
            M3_HEAD_RADIUS_MM + self.clearance(),
            M3_HEAD_HEIGHT_MM,
            DEFAULT_SEGMENTS,
        ))
    }
}

/// A complete M3 bolt: head on the XY plane, shaft above it.
#[derive(Debug, Clone, Copy)]
pub struct M3Bolt {
    /// The bolt head.
    pub head: M3BoltHead,
    /// The bolt shaft.
    pub shaft: M3BoltShaft,
}

impl M3Bolt {
    /// A bolt with the given shaft length.
    pub fn new(length: Length, has_clearance: bool) -> Self {
        Self {
            head: M3BoltHead::new(has_clearance),
            shaft: M3BoltShaft::new(length, has_clearance),
        }
    }
}

impl Object for M3Bolt {
    fn shape(&self) -> Result<Shape, CadError> {
        let head = self.head.shape()?;
        let shaft = self.shaft.shape()?.translate(0.0, 0.0, M3_HEAD_HEIGHT_MM);
        Ok(head.union(&shaft))
    }
}

/// An M3 hex nut.
#[derive(Debug, Clone, Copy)]
pub struct M3HexNut {
    has_clearance: bool,
}

impl M3HexNut {
    /// A hex nut.
    pub fn new(has_clearance: bool) -> Self {
        Self { has_clearance }
    }

    fn clearance(&self) -> f64 {
        if self.has_clearance {
            M3_BOLT_CLEARANCE_MM
        } else {
            0.0
        }
    }
}

impl Object for M3HexNut {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::hex_prism(
            M3_NUT_WAC_MM + self.clearance(),
            M3_NUT_HEIGHT_MM,
        ))
    }
}

/// A bolt with a nut threaded flush to the end of its shaft.
#[derive(Debug, Clone, Copy)]
pub struct M3BoltAssembly {
    /// The bolt.
    pub bolt: M3Bolt,
    /// The nut.
    pub nut: M3HexNut,
}

impl M3BoltAssembly {
    /// An assembly around a bolt of the given shaft length.
    pub fn new(length: Length, has_clearance: bool) -> Self {
        Self {
            bolt: M3Bolt::new(length, has_clearance),
            nut: M3HexNut::new(has_clearance),
        }
    }
}

impl Object for M3BoltAssembly {
    fn shape(&self) -> Result<Shape, CadError> {
        let bolt = self.bolt.shape()?;
        let shaft_length = self.bolt.shaft.length().mm();
        let nut = self.nut.shape()?.translate(
            0.0,
            0.0,
            M3_HEAD_HEIGHT_MM + shaft_length - M3_NUT_HEIGHT_MM,
        );
        Ok(bolt.union(&nut))
    }
}

/// A cylindrical clearance column with a bolt assembly cavity cut through it.
///
/// Embed the channel in a host solid by subtracting [`Object::cut`] (the
/// plain column) and unioning [`Object::shape`] (the column minus the
/// assembly) back in.
#[derive(Debug, Clone, Copy)]
pub struct M3BoltChannel {
    /// The assembly the channel is sized around (always with clearance).
    pub assembly: M3BoltAssembly,
    /// The surrounding column.
    pub column: Cylinder,
}

impl M3BoltChannel {
    /// A channel of the given overall length (bolt head included).
    pub fn new(length: Length) -> Result<Self, CadError> {
        let bolt_length = length - Length::millimeters(M3_HEAD_HEIGHT_MM);
        if bolt_length.mm() <= 0.0 {
            return Err(CadError::InvalidParameter(format!(
                "channel length {length} does not clear the bolt head"
            )));
        }
        let assembly = M3BoltAssembly::new(bolt_length, true);
        let bounds = assembly.shape()?.bounds().ok_or(CadError::EmptyGeometry)?;
        let [width, depth, height] = bounds.size();
        let max_diameter = width.max(depth);
        let column = Cylinder::new(
            Length::millimeters(height),
            Length::millimeters(max_diameter / 2.0 + M3_CHANNEL_PADDING_MM),
        );
        Ok(Self { assembly, column })
    }
}

impl Object for M3BoltChannel {
    fn shape(&self) -> Result<Shape, CadError> {
        let column = self.column.shape()?;
        let assembly = self.assembly.shape()?;
        Ok(column.difference(&assembly))
    }

    fn cut(&self) -> Result<Option<Shape>, CadError> {
        Ok(Some(self.column.shape()?))
    }
}
