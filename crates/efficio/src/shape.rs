//! Thin pass-through wrapper over the Manifold CSG kernel.
//!
//! [`Shape`] delegates every geometric operation — primitive construction,
//! booleans, affine transforms, meshing — to `manifold_rs`. Nothing in this
//! module implements solid modeling itself; the only logic here is bookkeeping
//! for the empty shape (which has no kernel handle) and a few composed
//! constructors (hexagonal and trapezoidal prisms, rounded boxes) expressed
//! entirely in terms of kernel primitives and booleans.

use std::f64::consts::PI;
use std::path::Path;

use manifold_rs::Manifold;

use crate::export::{self, SvgOptions, View};
use crate::CadError;

/// Default number of circular segments for curved primitives.
pub const DEFAULT_SEGMENTS: u32 = 64;

/// A triangle mesh extracted from the kernel.
///
/// Vertex positions are a flat array `[x0, y0, z0, x1, y1, z1, ...]`; indices
/// reference vertices in groups of three. This is the common input for every
/// export format.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Flat array of vertex positions.
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles in the mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Axis-aligned bounding box of a shape, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner `(x, y, z)`.
    pub min: [f64; 3],
    /// Maximum corner `(x, y, z)`.
    pub max: [f64; 3],
}

impl Bounds {
    /// Extent along each axis.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Midpoint of the box.
    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

/// A solid shape backed by the Manifold kernel.
///
/// An empty shape carries no kernel handle: it reports `None` bounds, acts as
/// the identity for [`Shape::union`] and yields nothing when meshed.
pub struct Shape {
    repr: Option<Manifold>,
}

impl Shape {
    fn from_manifold(manifold: Manifold) -> Self {
        Self {
            repr: Some(manifold),
        }
    }

    /// Re-derive this shape's kernel handle (identity translate).
    fn duplicate(&self) -> Self {
        self.translate(0.0, 0.0, 0.0)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an empty shape.
    pub fn empty() -> Self {
        Self { repr: None }
    }

    /// Create a box with its corner at the origin and the given dimensions.
    pub fn cube(x: f64, y: f64, z: f64) -> Self {
        Self::from_manifold(Manifold::cube(x, y, z))
    }

    /// Create a cylinder along the Z axis with its base at the origin.
    pub fn cylinder(radius: f64, height: f64, segments: u32) -> Self {
        Self::from_manifold(Manifold::cylinder(radius, radius, height, segments))
    }

    /// Create a cone or frustum along the Z axis with its base at the origin.
    pub fn cone(radius_bottom: f64, radius_top: f64, height: f64, segments: u32) -> Self {
        Self::from_manifold(Manifold::cylinder(
            radius_bottom,
            radius_top,
            height,
            segments,
        ))
    }

    /// Create a sphere centered at the origin.
    pub fn sphere(radius: f64, segments: u32) -> Self {
        Self::from_manifold(Manifold::sphere(radius, segments))
    }

    /// Create a regular hexagonal prism along Z with its base at the origin.
    ///
    /// `across_corners` is the circumscribed diameter (the nut convention);
    /// the prism is composed as the intersection of three slabs, so corners
    /// land on the X axis.
    pub fn hex_prism(across_corners: f64, height: f64) -> Self {
        let across_flats = across_corners * (PI / 6.0).cos();
        let big = across_corners * 2.0;
        let slab = |angle: f64| {
            Shape::cube(big, across_flats, height)
                .translate(-big / 2.0, -across_flats / 2.0, 0.0)
                .rotate(0.0, 0.0, angle)
        };
        slab(0.0)
            .intersection(&slab(60.0))
            .intersection(&slab(120.0))
    }

    /// Create a trapezoidal prism along Z with its base at the origin.
    ///
    /// The cross-section sits in the XY plane centered on the origin:
    /// `bottom_width` at `y = -profile_height / 2`, `top_width` (which must
    /// not exceed it) at `y = +profile_height / 2`. The sloped flanks are cut
    /// with rotated half-space boxes.
    pub fn trapezoid_prism(
        bottom_width: f64,
        top_width: f64,
        profile_height: f64,
        thickness: f64,
    ) -> Self {
        let base = Shape::cube(bottom_width, profile_height, thickness).translate(
            -bottom_width / 2.0,
            -profile_height / 2.0,
            0.0,
        );
        if (bottom_width - top_width).abs() < 1e-12 {
            return base;
        }

        let big = 4.0 * bottom_width.max(profile_height).max(thickness);
        let tilt = ((bottom_width - top_width) / 2.0)
            .atan2(profile_height)
            .to_degrees();
        let mid = (bottom_width + top_width) / 4.0;
        // Half-space x >= 0, rotated to the flank slope, then moved onto it.
        let right = Shape::cube(big, big, big)
            .translate(0.0, -big / 2.0, -big / 2.0)
            .rotate(0.0, 0.0, tilt)
            .translate(mid, 0.0, 0.0);
        let left = Shape::cube(big, big, big)
            .translate(-big, -big / 2.0, -big / 2.0)
            .rotate(0.0, 0.0, -tilt)
            .translate(-mid, 0.0, 0.0);
        base.difference(&right).difference(&left)
    }

    // =========================================================================
    // CSG operations
    // =========================================================================

    /// Boolean union (self ∪ other). The empty shape is the identity.
    pub fn union(&self, other: &Shape) -> Shape {
        match (&self.repr, &other.repr) {
            (Some(a), Some(b)) => Shape::from_manifold(a.union(b)),
            (Some(_), None) => self.duplicate(),
            (None, Some(_)) => other.duplicate(),
            (None, None) => Shape::empty(),
        }
    }

    /// Boolean difference (self − other).
    pub fn difference(&self, other: &Shape) -> Shape {
        match (&self.repr, &other.repr) {
            (Some(a), Some(b)) => Shape::from_manifold(a.difference(b)),
            (Some(_), None) => self.duplicate(),
            (None, _) => Shape::empty(),
        }
    }

    /// Boolean intersection (self ∩ other).
    pub fn intersection(&self, other: &Shape) -> Shape {
        match (&self.repr, &other.repr) {
            (Some(a), Some(b)) => Shape::from_manifold(a.intersection(b)),
            _ => Shape::empty(),
        }
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate the shape.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Shape {
        match &self.repr {
            Some(m) => Shape::from_manifold(m.translate(x, y, z)),
            None => Shape::empty(),
        }
    }

    /// Rotate the shape by degrees about the X, then Y, then Z axis.
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Shape {
        match &self.repr {
            Some(m) => Shape::from_manifold(m.rotate(x_deg, y_deg, z_deg)),
            None => Shape::empty(),
        }
    }

    /// Scale the shape.
    pub fn scale(&self, x: f64, y: f64, z: f64) -> Shape {
        match &self.repr {
            Some(m) => Shape::from_manifold(m.scale(x, y, z)),
            None => Shape::empty(),
        }
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    /// Keep a slab of the given thickness measured down from the top face.
    pub fn slice_top(&self, thickness: f64) -> Result<Shape, CadError> {
        let bounds = self.bounds().ok_or(CadError::EmptyGeometry)?;
        Ok(self.intersection(&Self::slab(&bounds, bounds.max[2] - thickness, thickness)))
    }

    /// Keep a slab of the given thickness measured up from the bottom face.
    pub fn slice_bottom(&self, thickness: f64) -> Result<Shape, CadError> {
        let bounds = self.bounds().ok_or(CadError::EmptyGeometry)?;
        Ok(self.intersection(&Self::slab(&bounds, bounds.min[2], thickness)))
    }

    /// A box spanning the shape's XY footprint from `z0` to `z0 + thickness`.
    fn slab(bounds: &Bounds, z0: f64, thickness: f64) -> Shape {
        let margin = 1.0;
        let [sx, sy, _] = bounds.size();
        Shape::cube(sx + 2.0 * margin, sy + 2.0 * margin, thickness).translate(
            bounds.min[0] - margin,
            bounds.min[1] - margin,
            z0,
        )
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if the shape has no geometry.
    pub fn is_empty(&self) -> bool {
        self.repr.is_none()
    }

    /// Get the mesh representation.
    pub fn to_mesh(&self) -> TriangleMesh {
        match &self.repr {
            Some(m) => {
                let mesh = m.to_mesh();
                TriangleMesh {
                    vertices: mesh.vertices(),
                    indices: mesh.indices(),
                }
            }
            None => TriangleMesh::default(),
        }
    }

    /// Axis-aligned bounding box, or `None` for an empty shape.
    pub fn bounds(&self) -> Option<Bounds> {
        let mesh = self.to_mesh();
        if mesh.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for chunk in mesh.vertices.chunks(3) {
            for i in 0..3 {
                let v = chunk[i] as f64;
                if v < min[i] {
                    min[i] = v;
                }
                if v > max[i] {
                    max[i] = v;
                }
            }
        }
        Some(Bounds { min, max })
    }

    /// Signed volume of the mesh (uses the divergence theorem).
    ///
    /// Returns a positive value for well-formed closed meshes.
    pub fn volume(&self) -> f64 {
        let mesh = self.to_mesh();
        let verts = &mesh.vertices;
        let mut vol = 0.0;
        for tri in mesh.indices.chunks(3) {
            let (i0, i1, i2) = (
                tri[0] as usize * 3,
                tri[1] as usize * 3,
                tri[2] as usize * 3,
            );
            let v0 = [verts[i0] as f64, verts[i0 + 1] as f64, verts[i0 + 2] as f64];
            let v1 = [verts[i1] as f64, verts[i1 + 1] as f64, verts[i1 + 2] as f64];
            let v2 = [verts[i2] as f64, verts[i2 + 1] as f64, verts[i2 + 2] as f64];
            // Signed volume of tetrahedron formed with origin
            vol += v0[0] * (v1[1] * v2[2] - v2[1] * v1[2])
                - v1[0] * (v0[1] * v2[2] - v2[1] * v0[2])
                + v2[0] * (v0[1] * v1[2] - v1[1] * v0[2]);
        }
        (vol / 6.0).abs()
    }

    /// Total surface area of the mesh.
    pub fn surface_area(&self) -> f64 {
        let mesh = self.to_mesh();
        let verts = &mesh.vertices;
        let mut area = 0.0;
        for tri in mesh.indices.chunks(3) {
            let (i0, i1, i2) = (
                tri[0] as usize * 3,
                tri[1] as usize * 3,
                tri[2] as usize * 3,
            );
            let e1 = [
                (verts[i1] - verts[i0]) as f64,
                (verts[i1 + 1] - verts[i0 + 1]) as f64,
                (verts[i1 + 2] - verts[i0 + 2]) as f64,
            ];
            let e2 = [
                (verts[i2] - verts[i0]) as f64,
                (verts[i2 + 1] - verts[i0 + 1]) as f64,
                (verts[i2 + 2] - verts[i0 + 2]) as f64,
            ];
            let cx = e1[1] * e2[2] - e1[2] * e2[1];
            let cy = e1[2] * e2[0] - e1[0] * e2[2];
            let cz = e1[0] * e2[1] - e1[1] * e2[0];
            area += (cx * cx + cy * cy + cz * cz).sqrt() / 2.0;
        }
        area
    }

    /// Number of triangles in the mesh.
    pub fn num_triangles(&self) -> usize {
        self.to_mesh().num_triangles()
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Export to binary STL bytes (delegates to [`export::stl::to_stl_bytes`]).
    pub fn to_stl(&self) -> Result<Vec<u8>, CadError> {
        export::stl::to_stl_bytes(self)
    }

    /// Write STL to file (delegates to [`export::stl::export_stl`]).
    pub fn write_stl(&self, path: impl AsRef<Path>) -> Result<(), CadError> {
        export::stl::export_stl(self, path)
    }

    /// Render a single projected view as an SVG document string.
    pub fn to_svg(&self, view: View, options: &SvgOptions) -> Result<String, CadError> {
        export::svg::to_svg_string(self, view, options)
    }

    /// Write a projected view to an SVG file.
    pub fn write_svg(&self, path: impl AsRef<Path>, view: View) -> Result<(), CadError> {
        export::svg::export_svg(self, path, view, &SvgOptions::default())
    }

    /// Write a 2×2 composite PNG of the top, front, left and isometric views.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), CadError> {
        export::png::export_png(self, path)
    }
}

/// Helper to create a centered box (boxes are corner-aligned at origin by default).
pub fn centered_cube(x: f64, y: f64, z: f64) -> Shape {
    Shape::cube(x, y, z).translate(-x / 2.0, -y / 2.0, -z / 2.0)
}

/// Helper to create a centered cylinder.
pub fn centered_cylinder(radius: f64, height: f64, segments: u32) -> Shape {
    Shape::cylinder(radius, height, segments).translate(0.0, 0.0, -height / 2.0)
}

/// A box with every edge and corner rounded to `radius`, corner-aligned at
/// the origin.
///
/// Composed from boxes, edge cylinders and corner spheres; `radius` must be
/// less than half the smallest dimension.
pub fn rounded_cube(x: f64, y: f64, z: f64, radius: f64, segments: u32) -> Result<Shape, CadError> {
    let r = radius;
    if 2.0 * r >= x.min(y).min(z) {
        return Err(CadError::InvalidParameter(format!(
            "fillet radius {r} too large for a {x}x{y}x{z} box"
        )));
    }

    let mut result = Shape::cube(x, y - 2.0 * r, z - 2.0 * r).translate(0.0, r, r);
    result = result.union(&Shape::cube(x - 2.0 * r, y, z - 2.0 * r).translate(r, 0.0, r));
    result = result.union(&Shape::cube(x - 2.0 * r, y - 2.0 * r, z).translate(r, r, 0.0));

    // Edges along Z, X and Y.
    for &(cx, cy) in &[(r, r), (x - r, r), (r, y - r), (x - r, y - r)] {
        result = result.union(&Shape::cylinder(r, z - 2.0 * r, segments).translate(cx, cy, r));
    }
    for &(cy, cz) in &[(r, r), (y - r, r), (r, z - r), (y - r, z - r)] {
        let edge = Shape::cylinder(r, x - 2.0 * r, segments)
            .rotate(0.0, 90.0, 0.0)
            .translate(r, cy, cz);
        result = result.union(&edge);
    }
    for &(cx, cz) in &[(r, r), (x - r, r), (r, z - r), (x - r, z - r)] {
        let edge = Shape::cylinder(r, y - 2.0 * r, segments)
            .rotate(-90.0, 0.0, 0.0)
            .translate(cx, r, cz);
        result = result.union(&edge);
    }

    // Corner spheres.
    for &cx in &[r, x - r] {
        for &cy in &[r, y - r] {
            for &cz in &[r, z - r] {
                result = result.union(&Shape::sphere(r, segments).translate(cx, cy, cz));
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_shape() {
        let empty = Shape::empty();
        assert!(empty.is_empty());
        assert!(empty.bounds().is_none());
        assert_eq!(empty.num_triangles(), 0);
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let cube = Shape::cube(10.0, 10.0, 10.0);
        let joined = Shape::empty().union(&cube);
        let bounds = joined.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 10.0, epsilon = 1e-4);
        assert!(cube.union(&Shape::empty()).bounds().is_some());
    }

    #[test]
    fn test_cube_bounds() {
        let cube = Shape::cube(10.0, 20.0, 30.0);
        let bounds = cube.bounds().unwrap();
        let [sx, sy, sz] = bounds.size();
        assert_relative_eq!(sx, 10.0, epsilon = 1e-4);
        assert_relative_eq!(sy, 20.0, epsilon = 1e-4);
        assert_relative_eq!(sz, 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cube_volume_and_area() {
        let cube = Shape::cube(10.0, 10.0, 10.0);
        let vol = cube.volume();
        assert!((vol - 1000.0).abs() < 1.0, "expected ~1000, got {vol}");
        let area = cube.surface_area();
        assert!((area - 600.0).abs() < 1.0, "expected ~600, got {area}");
        assert!(cube.num_triangles() >= 12);
    }

    #[test]
    fn test_cylinder_extents() {
        let cyl = Shape::cylinder(10.0, 10.0, 32);
        let bounds = cyl.bounds().unwrap();
        // 32 segments include vertices on both axes, so XY extents are exact.
        assert_relative_eq!(bounds.size()[0], 20.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[1], 20.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.min[2], 0.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cone_tapers() {
        let cone = Shape::cone(10.0, 2.0, 8.0, 32);
        let bounds = cone.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 20.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[2], 8.0, epsilon = 1e-4);
        let tip = cone.slice_top(0.5).unwrap().bounds().unwrap();
        assert!(tip.size()[0] < 5.5);
    }

    #[test]
    fn test_sphere_extents() {
        let sphere = Shape::sphere(10.0, 32);
        let bounds = sphere.bounds().unwrap();
        for extent in bounds.size() {
            assert!((extent - 20.0).abs() < 0.3, "extent {extent}");
        }
    }

    #[test]
    fn test_difference_keeps_outer_extents() {
        let block = Shape::cube(10.0, 10.0, 10.0);
        let hole = Shape::cylinder(3.0, 15.0, 32).translate(5.0, 5.0, -1.0);
        let punched = block.difference(&hole);
        let bounds = punched.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 10.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[2], 10.0, epsilon = 1e-4);
        assert!(punched.volume() < block.volume());
    }

    #[test]
    fn test_union_extents() {
        let a = Shape::cube(10.0, 10.0, 10.0);
        let b = Shape::cube(10.0, 10.0, 10.0).translate(5.0, 0.0, 0.0);
        let joined = a.union(&b);
        let bounds = joined.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 15.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[1], 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hex_prism_extents() {
        let across_corners = 6.35;
        let hex = Shape::hex_prism(across_corners, 2.4);
        let bounds = hex.bounds().unwrap();
        // Corners on the X axis, flats facing Y.
        assert_relative_eq!(bounds.size()[0], across_corners, epsilon = 1e-4);
        assert_relative_eq!(
            bounds.size()[1],
            across_corners * (PI / 6.0).cos(),
            epsilon = 1e-4
        );
        assert_relative_eq!(bounds.size()[2], 2.4, epsilon = 1e-4);
    }

    #[test]
    fn test_trapezoid_prism_extents() {
        let prism = Shape::trapezoid_prism(13.0, 6.5, 18.0, 10.0);
        let bounds = prism.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 13.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[1], 18.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[2], 10.0, epsilon = 1e-4);
        // The top must actually taper.
        let rect = Shape::trapezoid_prism(13.0, 13.0, 18.0, 10.0);
        assert!(prism.volume() < rect.volume());
    }

    #[test]
    fn test_slices_are_complementary() {
        let cube = Shape::cube(10.0, 10.0, 10.0);
        let lid = cube.slice_top(3.0).unwrap();
        let body = cube.slice_bottom(7.0).unwrap();
        let lid_bounds = lid.bounds().unwrap();
        let body_bounds = body.bounds().unwrap();
        assert_relative_eq!(lid_bounds.size()[2], 3.0, epsilon = 1e-4);
        assert_relative_eq!(lid_bounds.max[2], 10.0, epsilon = 1e-4);
        assert_relative_eq!(body_bounds.size()[2], 7.0, epsilon = 1e-4);
        assert_relative_eq!(body_bounds.min[2], 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_scale() {
        let cube = Shape::cube(10.0, 10.0, 10.0).scale(2.0, 1.0, 1.0);
        let bounds = cube.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 20.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.size()[1], 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_centered_helpers() {
        let cube = centered_cube(10.0, 20.0, 30.0);
        let bounds = cube.bounds().unwrap();
        assert_relative_eq!(bounds.min[0], -5.0, epsilon = 1e-4);
        assert_relative_eq!(bounds.max[2], 15.0, epsilon = 1e-4);
        let cyl = centered_cylinder(5.0, 10.0, 32);
        let bounds = cyl.bounds().unwrap();
        assert_relative_eq!(bounds.min[2], -5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rounded_cube() {
        let rounded = rounded_cube(20.0, 20.0, 20.0, 3.0, 32).unwrap();
        let bounds = rounded.bounds().unwrap();
        assert_relative_eq!(bounds.size()[0], 20.0, epsilon = 1e-3);
        // Rounding shaves the corners off.
        assert!(rounded.volume() < Shape::cube(20.0, 20.0, 20.0).volume());
        assert!(rounded_cube(10.0, 10.0, 10.0, 6.0, 32).is_err());
    }
}
