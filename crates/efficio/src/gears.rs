//! Parametric gear construction.
//!
//! Tooth geometry is derived from three inputs — maximum radius, tooth count
//! and thickness — through the classic set of gear quantities (pitch angle,
//! pitch radius, circular pitch, addendum/dedendum, chord widths). The solid
//! gear is then composed by the kernel: a base disc unioned with a ring of
//! extruded tooth prisms. Spherical gears place tooth blocks on rings of a
//! sphere's surface instead.

use std::f64::consts::PI;

use crate::shape::{centered_cube, Shape, DEFAULT_SEGMENTS};
use crate::{CadError, Length, Object};

/// Gear sizing standard: how tooth size relates to pitch diameter.
///
/// Values returned by the sizing math are in the standard's native unit:
/// millimeters for metric modules, inches for diametral pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GearStandard {
    /// Metric (ISO) module — millimeters of pitch diameter per tooth.
    Module(f64),
    /// Imperial (AGMA) diametral pitch — teeth per inch of pitch diameter.
    DiametralPitch(f64),
}

impl GearStandard {
    /// ISO module 0.8.
    pub const MODULE_0_8: Self = Self::Module(0.8);
    /// ISO module 1.
    pub const MODULE_1: Self = Self::Module(1.0);
    /// ISO module 1.25.
    pub const MODULE_1_25: Self = Self::Module(1.25);
    /// ISO module 1.5.
    pub const MODULE_1_5: Self = Self::Module(1.5);
    /// ISO module 2.
    pub const MODULE_2: Self = Self::Module(2.0);
    /// ISO module 2.5.
    pub const MODULE_2_5: Self = Self::Module(2.5);
    /// ISO module 3.
    pub const MODULE_3: Self = Self::Module(3.0);
    /// ISO module 4.
    pub const MODULE_4: Self = Self::Module(4.0);

    /// Fine pitch for 3D printing (alias of module 1).
    pub const MODULE_FINE: Self = Self::MODULE_1;
    /// Normal pitch for 3D printing (alias of module 1.5).
    pub const MODULE_NORMAL: Self = Self::MODULE_1_5;
    /// Large pitch for 3D printing (alias of module 2).
    pub const MODULE_LARGE: Self = Self::MODULE_2;

    /// Diametral pitch 24.
    pub const PITCH_24: Self = Self::DiametralPitch(24.0);
    /// Diametral pitch 20.
    pub const PITCH_20: Self = Self::DiametralPitch(20.0);
    /// Diametral pitch 16.
    pub const PITCH_16: Self = Self::DiametralPitch(16.0);
    /// Diametral pitch 14.
    pub const PITCH_14: Self = Self::DiametralPitch(14.0);
    /// Diametral pitch 12.
    pub const PITCH_12: Self = Self::DiametralPitch(12.0);
    /// Diametral pitch 10.
    pub const PITCH_10: Self = Self::DiametralPitch(10.0);

    /// Fine imperial pitch for 3D printing (alias of DP 20).
    pub const PITCH_FINE: Self = Self::PITCH_20;
    /// Normal imperial pitch for 3D printing (alias of DP 16).
    pub const PITCH_NORMAL: Self = Self::PITCH_16;
    /// Large imperial pitch for 3D printing (alias of DP 12).
    pub const PITCH_LARGE: Self = Self::PITCH_12;

    /// Radius of the pitch circle for a gear with `tooth_count` teeth.
    ///
    /// Metric gears: `R = m·N / 2`. Diametral pitch gears: `R = N / (2·DP)`.
    pub fn pitch_radius(&self, tooth_count: u32) -> f64 {
        match self {
            Self::Module(m) => m * f64::from(tooth_count) / 2.0,
            Self::DiametralPitch(dp) => f64::from(tooth_count) / (2.0 * dp),
        }
    }

    /// Radius of the addendum circle (pitch radius plus one tooth-size unit).
    pub fn addendum_radius(&self, tooth_count: u32) -> f64 {
        let pitch_radius = self.pitch_radius(tooth_count);
        match self {
            Self::Module(m) => pitch_radius + m,
            Self::DiametralPitch(dp) => pitch_radius + 1.0 / dp,
        }
    }

    /// Commonly used metric preset names.
    pub fn module_examples() -> &'static [&'static str] {
        &[
            "MODULE_FINE",
            "MODULE_NORMAL",
            "MODULE_LARGE",
            "MODULE_1",
            "MODULE_1_5",
            "MODULE_2",
        ]
    }

    /// Commonly used imperial preset names.
    pub fn diametral_pitch_examples() -> &'static [&'static str] {
        &[
            "PITCH_FINE",
            "PITCH_NORMAL",
            "PITCH_LARGE",
            "PITCH_20",
            "PITCH_16",
            "PITCH_12",
        ]
    }
}

/// Pressure angle: the angle between the line of action and the line normal
/// to the gear surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureAngle {
    /// 20° — the modern default.
    Modern,
    /// 14.5° — legacy gearing.
    Old,
    /// 25° — high-torque applications.
    HighTorque,
}

impl PressureAngle {
    /// The angle in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            Self::Modern => 20.0,
            Self::Old => 14.5,
            Self::HighTorque => 25.0,
        }
    }

    /// Preset names.
    pub fn examples() -> &'static [&'static str] {
        &["MODERN", "OLD", "HIGH_TORQUE"]
    }
}

/// The dimensions a tooth profile derives its geometry from, in millimeters.
#[derive(Debug, Clone, Copy)]
pub struct GearDimensions {
    /// Radius of the circle through the tooth tips.
    pub maximum_radius: f64,
    /// Number of teeth around the rim.
    pub tooth_count: u32,
    /// Extent of the gear along its axis.
    pub thickness: f64,
}

/// A straight-flanked tooth profile with a configurable tip width.
///
/// A top-width ratio of 1 gives a rectangular tooth, 0.5 the standard
/// trapezoidal tooth.
#[derive(Debug, Clone, Copy)]
pub struct TrapezoidalTooth {
    dims: GearDimensions,
    top_width_ratio: f64,
}

impl TrapezoidalTooth {
    /// A tooth with the given tip-to-base width ratio.
    pub fn new(dims: GearDimensions, top_width_ratio: f64) -> Self {
        Self {
            dims,
            top_width_ratio,
        }
    }

    /// A rectangular tooth (tip as wide as the base).
    pub fn rectangular(dims: GearDimensions) -> Self {
        Self::new(dims, 1.0)
    }

    /// A trapezoidal tooth (tip half as wide as the base).
    pub fn trapezoidal(dims: GearDimensions) -> Self {
        Self::new(dims, 0.5)
    }

    /// The angle subtended by one tooth-to-tooth step: `2π / N`.
    pub fn pitch_angle(&self) -> f64 {
        2.0 * PI / f64::from(self.dims.tooth_count)
    }

    /// Radius of the circle through the points of contact with a mating gear.
    pub fn pitch_radius(&self) -> f64 {
        self.dims.maximum_radius * 0.85
    }

    /// Radial extent of the tooth above the pitch circle.
    pub fn addendum(&self) -> f64 {
        self.circular_pitch() * 0.7 * 2.0 / 3.0
    }

    /// Radial extent of the tooth below the pitch circle.
    pub fn dedendum(&self) -> f64 {
        self.circular_pitch() * 0.7 / 3.0
    }

    /// Arc distance between corresponding points on adjacent teeth along the
    /// pitch circle.
    pub fn circular_pitch(&self) -> f64 {
        self.pitch_radius() * self.pitch_angle()
    }

    /// Full radial height of the tooth.
    pub fn tooth_height(&self) -> f64 {
        self.addendum() + self.dedendum()
    }

    /// Width of the tooth base along the chord.
    pub fn tooth_width(&self) -> f64 {
        self.chord_width() / 2.0
    }

    /// Width of the tooth tip.
    pub fn top_width(&self) -> f64 {
        self.tooth_width() * self.top_width_ratio
    }

    /// Straight-line distance between the start of one tooth and the end of
    /// the next along the pitch circle.
    pub fn chord_width(&self) -> f64 {
        2.0 * self.pitch_radius() * (self.pitch_angle() / 2.0).sin()
    }

    /// Chord width measured on the maximum-radius circle.
    pub fn max_chord_width(&self) -> f64 {
        2.0 * self.dims.maximum_radius * (self.pitch_angle() / 2.0).sin()
    }

    /// Chord width measured on the base circle.
    pub fn base_chord_width(&self) -> f64 {
        2.0 * self.base_radius() * (self.pitch_angle() / 2.0).sin()
    }

    /// Radius of the circle through the tips plus the addendum.
    pub fn addendum_radius(&self) -> f64 {
        self.pitch_radius() + self.addendum()
    }

    /// Radius of the circle through the tips minus the dedendum.
    pub fn dedendum_radius(&self) -> f64 {
        self.pitch_radius() - self.dedendum()
    }

    /// Radius of the disc the teeth sit on.
    ///
    /// The maximum circle passes through the center of the tooth tip, not its
    /// corners, and the base circle likewise misses the center of the tooth
    /// root; both radii are corrected by the half-pitch-angle cosine.
    pub fn base_radius(&self) -> f64 {
        let cos_half_pitch = (self.pitch_angle() / 2.0).cos();
        let top_of_tooth_radius = cos_half_pitch * self.dims.maximum_radius;
        let bottom_of_tooth_radius = top_of_tooth_radius - self.tooth_height();
        let adjustment = bottom_of_tooth_radius - bottom_of_tooth_radius * cos_half_pitch;
        bottom_of_tooth_radius + adjustment
    }

    /// The solid tooth prism, centered on the origin in all three axes with
    /// the tip facing +Y.
    pub fn profile(&self) -> Shape {
        let thickness = self.dims.thickness;
        Shape::trapezoid_prism(
            self.tooth_width(),
            self.top_width(),
            self.tooth_height(),
            thickness,
        )
        .translate(0.0, 0.0, -thickness / 2.0)
    }
}

/// A trapezoidal tooth intended for spherical gears, defined by the 2D
/// cross-section revolved or swept along the sphere's surface.
#[derive(Debug, Clone, Copy)]
pub struct SphericalTooth {
    inner: TrapezoidalTooth,
}

impl SphericalTooth {
    /// A spherical tooth for the given gear dimensions.
    pub fn new(dims: GearDimensions) -> Self {
        Self {
            inner: TrapezoidalTooth::trapezoidal(dims),
        }
    }

    /// The underlying trapezoidal profile math.
    pub fn profile_math(&self) -> &TrapezoidalTooth {
        &self.inner
    }

    /// The 2D cross-section of a tooth on the sphere surface.
    ///
    /// X coordinates are radial distances from the gear center, Y coordinates
    /// half-widths across the tooth: base corners first, then the tip.
    pub fn profile_points(&self) -> [[f64; 2]; 4] {
        let tooth_height = self.inner.tooth_height();
        let base_width = self.inner.tooth_width();
        let top_width = self.inner.top_width();
        let gear_radius = self.inner.dims.maximum_radius;
        let r_base = gear_radius - tooth_height;
        [
            [r_base, -base_width / 2.0],
            [gear_radius, -top_width / 2.0],
            [gear_radius, top_width / 2.0],
            [r_base, base_width / 2.0],
        ]
    }
}

/// An involute tooth.
///
/// Only the sizing math is available; the solid involute flank is delegated
/// territory this layer does not reproduce, so profile construction reports
/// an unsupported operation.
#[derive(Debug, Clone, Copy)]
pub struct InvoluteTooth {
    dims: GearDimensions,
}

impl InvoluteTooth {
    /// An involute tooth for the given gear dimensions.
    pub fn new(dims: GearDimensions) -> Self {
        Self { dims }
    }

    /// Radius of the circle through the points of contact with a mating gear.
    pub fn pitch_radius(&self) -> f64 {
        self.dims.maximum_radius * 0.85
    }
}

/// The tooth profile a gear is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToothForm {
    /// Straight tooth, tip as wide as the base.
    Rectangular,
    /// Straight tooth, tip half as wide as the base.
    Trapezoidal,
    /// Involute flanks (sizing math only).
    Involute,
    /// Trapezoidal teeth arranged on a sphere.
    SphericalTrapezoidal,
}

/// A parametric gear: a toothed disc, or a toothed sphere for the spherical
/// form.
#[derive(Debug, Clone, Copy)]
pub struct Gear {
    /// Radius of the circle through the tooth tips.
    pub maximum_radius: Length,
    /// Number of teeth around the rim.
    pub tooth_count: u32,
    /// Extent along the gear axis.
    pub thickness: Length,
    /// Tooth profile.
    pub form: ToothForm,
}

impl Gear {
    /// A gear with an explicit tooth form.
    pub fn new(maximum_radius: Length, tooth_count: u32, thickness: Length, form: ToothForm) -> Self {
        Self {
            maximum_radius,
            tooth_count,
            thickness,
            form,
        }
    }

    /// A gear with rectangular teeth.
    pub fn rectangular(maximum_radius: Length, tooth_count: u32, thickness: Length) -> Self {
        Self::new(maximum_radius, tooth_count, thickness, ToothForm::Rectangular)
    }

    /// A gear with trapezoidal teeth.
    pub fn trapezoidal(maximum_radius: Length, tooth_count: u32, thickness: Length) -> Self {
        Self::new(maximum_radius, tooth_count, thickness, ToothForm::Trapezoidal)
    }

    /// A spherical gear with trapezoidal tooth blocks on its surface.
    pub fn spherical(maximum_radius: Length, tooth_count: u32) -> Self {
        Self::new(
            maximum_radius,
            tooth_count,
            Length::millimeters(1.0),
            ToothForm::SphericalTrapezoidal,
        )
    }

    /// The resolved millimeter dimensions.
    pub fn dimensions(&self) -> GearDimensions {
        GearDimensions {
            maximum_radius: self.maximum_radius.mm(),
            tooth_count: self.tooth_count,
            thickness: self.thickness.mm(),
        }
    }

    /// Base disc plus a ring of tooth prisms.
    fn toothed_disc(&self, tooth: &TrapezoidalTooth) -> Shape {
        let dims = self.dimensions();
        let base_radius = tooth.base_radius();
        let pitch_angle = tooth.pitch_angle();
        let min_radius_adjustment = base_radius - base_radius * (pitch_angle / 2.0).cos();
        let tooth_height = tooth.tooth_height();
        let translation_distance =
            dims.maximum_radius - tooth_height / 2.0 - min_radius_adjustment;

        let mut gear = Shape::cylinder(base_radius, dims.thickness, DEFAULT_SEGMENTS);
        for i in 0..dims.tooth_count {
            let step = f64::from(i);
            let x_offset = translation_distance * (step * pitch_angle).sin();
            let y_offset = translation_distance * (step * pitch_angle).cos();
            let tooth_shape = tooth
                .profile()
                .rotate(0.0, 0.0, -step * 360.0 / f64::from(dims.tooth_count))
                .translate(x_offset, y_offset, dims.thickness / 2.0);
            gear = gear.union(&tooth_shape);
        }
        gear
    }

    /// Sphere with tooth blocks placed on rings at the equator and ±30°.
    fn toothed_sphere(&self) -> Shape {
        let dims = self.dimensions();
        let radius = dims.maximum_radius;
        let tooth_height = radius * 0.1;
        let tooth_size = radius * 0.05;

        let mut gear = Shape::sphere(radius, DEFAULT_SEGMENTS);
        for polar in [PI / 2.0, PI / 2.0 - PI / 6.0, PI / 2.0 + PI / 6.0] {
            for i in 0..dims.tooth_count {
                let azimuth = 2.0 * PI * f64::from(i) / f64::from(dims.tooth_count);
                let x = radius * polar.sin() * azimuth.cos();
                let y = radius * polar.sin() * azimuth.sin();
                let z = radius * polar.cos();
                let tooth =
                    centered_cube(tooth_size, tooth_size, tooth_height).translate(x, y, z);
                gear = gear.union(&tooth);
            }
        }
        gear
    }
}

impl Object for Gear {
    fn shape(&self) -> Result<Shape, CadError> {
        let dims = self.dimensions();
        match self.form {
            ToothForm::Rectangular => Ok(self.toothed_disc(&TrapezoidalTooth::rectangular(dims))),
            ToothForm::Trapezoidal => Ok(self.toothed_disc(&TrapezoidalTooth::trapezoidal(dims))),
            ToothForm::SphericalTrapezoidal => Ok(self.toothed_sphere()),
            ToothForm::Involute => Err(CadError::Unsupported("involute tooth profile")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn golden_dims() -> GearDimensions {
        GearDimensions {
            maximum_radius: 50.0,
            tooth_count: 10,
            thickness: 10.0,
        }
    }

    #[test]
    fn test_rectangular_tooth_geometry() {
        let tooth = TrapezoidalTooth::rectangular(golden_dims());
        assert_relative_eq!(tooth.pitch_angle(), 0.6283185307179586, epsilon = 1e-12);
        assert_relative_eq!(tooth.pitch_radius(), 42.5, epsilon = 1e-12);
        assert_relative_eq!(tooth.circular_pitch(), 26.703537555513243, epsilon = 1e-9);
        assert_relative_eq!(tooth.tooth_height(), 18.692476288859268, epsilon = 1e-9);
        assert_relative_eq!(tooth.tooth_width(), 13.133222260935265, epsilon = 1e-9);
        assert_relative_eq!(tooth.chord_width(), 26.26644452187053, epsilon = 1e-9);
        assert_relative_eq!(tooth.base_radius(), 30.27287557263539, epsilon = 1e-9);
    }

    #[test]
    fn test_trapezoidal_tooth_tip_narrows() {
        let tooth = TrapezoidalTooth::trapezoidal(golden_dims());
        assert_relative_eq!(tooth.top_width(), tooth.tooth_width() / 2.0, epsilon = 1e-12);
        let rectangular = TrapezoidalTooth::rectangular(golden_dims());
        assert_relative_eq!(
            rectangular.top_width(),
            rectangular.tooth_width(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_derived_radii() {
        let tooth = TrapezoidalTooth::rectangular(golden_dims());
        assert_relative_eq!(
            tooth.addendum_radius(),
            tooth.pitch_radius() + tooth.addendum(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            tooth.dedendum_radius(),
            tooth.pitch_radius() - tooth.dedendum(),
            epsilon = 1e-12
        );
        assert!(tooth.base_chord_width() < tooth.chord_width());
        assert!(tooth.max_chord_width() > tooth.chord_width());
    }

    #[test]
    fn test_tooth_profile_extents() {
        let tooth = TrapezoidalTooth::rectangular(golden_dims());
        let bounds = tooth.profile().bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], tooth.tooth_width(), epsilon = 1e-3);
        assert_relative_eq!(bounds.size()[1], tooth.tooth_height(), epsilon = 1e-3);
        assert_relative_eq!(bounds.min[2], -5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_gear_standards() {
        assert_relative_eq!(GearStandard::MODULE_1_5.pitch_radius(20), 15.0);
        assert_relative_eq!(GearStandard::MODULE_1_5.addendum_radius(20), 16.5);
        assert_relative_eq!(GearStandard::PITCH_20.pitch_radius(40), 1.0);
        assert_relative_eq!(GearStandard::PITCH_20.addendum_radius(40), 1.05);
        assert_eq!(GearStandard::MODULE_NORMAL, GearStandard::MODULE_1_5);
        assert_eq!(GearStandard::module_examples().len(), 6);
        assert_eq!(GearStandard::diametral_pitch_examples().len(), 6);
    }

    #[test]
    fn test_pressure_angles() {
        assert_relative_eq!(PressureAngle::Modern.degrees(), 20.0);
        assert_relative_eq!(PressureAngle::Old.degrees(), 14.5);
        assert_relative_eq!(PressureAngle::HighTorque.degrees(), 25.0);
        assert_eq!(PressureAngle::examples().len(), 3);
    }

    #[test]
    fn test_spherical_tooth_profile_points() {
        let tooth = SphericalTooth::new(golden_dims());
        let points = tooth.profile_points();
        let math = tooth.profile_math();
        assert_relative_eq!(points[0][0], 50.0 - math.tooth_height(), epsilon = 1e-9);
        assert_relative_eq!(points[1][0], 50.0, epsilon = 1e-12);
        assert_relative_eq!(points[1][1], -math.top_width() / 2.0, epsilon = 1e-9);
        assert_relative_eq!(points[3][1], math.tooth_width() / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rectangular_gear_shape() {
        let gear = Gear::rectangular(Length::millimeters(20.0), 8, Length::millimeters(5.0));
        let shape = gear.shape().unwrap();
        let bounds = shape.bounds().unwrap();
        let tooth = TrapezoidalTooth::rectangular(gear.dimensions());
        assert!(bounds.size()[0] <= 40.2);
        assert!(bounds.size()[0] >= 2.0 * tooth.base_radius());
        assert_relative_eq!(bounds.min[2], 0.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_spherical_gear_shape() {
        let gear = Gear::spherical(Length::millimeters(10.0), 8);
        let shape = gear.shape().unwrap();
        let bounds = shape.bounds().unwrap();
        // Tooth blocks at the equator reach half a tooth height past the
        // sphere surface.
        assert!((bounds.size()[0] - 20.5).abs() < 0.3, "{:?}", bounds.size());
        assert!((bounds.size()[2] - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_involute_gear_is_math_only() {
        let dims = golden_dims();
        assert_relative_eq!(InvoluteTooth::new(dims).pitch_radius(), 42.5);
        let gear = Gear::new(
            Length::millimeters(50.0),
            10,
            Length::millimeters(10.0),
            ToothForm::Involute,
        );
        assert!(matches!(gear.shape(), Err(CadError::Unsupported(_))));
    }
}
