//! Primitive solid parts: box, cylinder, sphere.
//!
//! Each part stores its dimensions as [`Length`] values and resolves them to
//! millimeters only when the kernel geometry is built.

use crate::shape::{centered_cube, Shape, DEFAULT_SEGMENTS};
use crate::{CadError, Length, Object};

/// A rectangular box, centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    /// Extent along X.
    pub width: Length,
    /// Extent along Y.
    pub length: Length,
    /// Extent along Z.
    pub depth: Length,
}

impl Cuboid {
    /// Create a box from its three extents.
    pub fn new(width: Length, length: Length, depth: Length) -> Self {
        Self {
            width,
            length,
            depth,
        }
    }
}

impl Object for Cuboid {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(centered_cube(
            self.width.mm(),
            self.length.mm(),
            self.depth.mm(),
        ))
    }
}

/// A circular cylinder along Z with its base on the XY plane.
#[derive(Debug, Clone, Copy)]
pub struct Cylinder {
    /// Extent along Z.
    pub length: Length,
    /// Cross-section radius.
    pub radius: Length,
}

impl Cylinder {
    /// Create a cylinder from its length and radius.
    pub fn new(length: Length, radius: Length) -> Self {
        Self { length, radius }
    }
}

impl Object for Cylinder {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::cylinder(
            self.radius.mm(),
            self.length.mm(),
            DEFAULT_SEGMENTS,
        ))
    }
}

/// A sphere centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Sphere radius.
    pub radius: Length,
}

impl Sphere {
    /// Create a sphere from its radius.
    pub fn new(radius: Length) -> Self {
        Self { radius }
    }
}

impl Object for Sphere {
    fn shape(&self) -> Result<Shape, CadError> {
        Ok(Shape::sphere(self.radius.mm(), DEFAULT_SEGMENTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_is_centered() {
        let shape = Cuboid::new(
            Length::millimeters(10.0),
            Length::millimeters(20.0),
            Length::millimeters(30.0),
        )
        .shape()
        .unwrap();
        let bounds = shape.bounds().unwrap();
        assert_relative_eq!(bounds.min[0], -5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[1], 10.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[2], 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cylinder_base_on_plane() {
        let shape = Cylinder::new(Length::millimeters(10.0), Length::millimeters(10.0))
            .shape()
            .unwrap();
        let bounds = shape.bounds().unwrap();
        assert_relative_eq!(bounds.min[2], 0.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 10.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[0], 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sphere_extents() {
        let shape = Sphere::new(Length::inches(1.0)).shape().unwrap();
        let bounds = shape.bounds().unwrap();
        for extent in bounds.size() {
            assert!((extent - 50.8).abs() < 0.5, "extent {extent}");
        }
    }
}
