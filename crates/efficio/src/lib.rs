#![warn(missing_docs)]

//! efficio — parametric part construction in Rust.
//!
//! A thin convenience layer over the Manifold CSG kernel: helper constructors
//! for primitive solids, parametric gear profiles, M3 hardware fasteners and
//! a rounded container, with export to STL, SVG and PNG. All solid modeling
//! (booleans, meshing) is delegated to the kernel; this crate only composes
//! its primitives.
//!
//! # Example
//!
//! ```rust,no_run
//! use efficio::fasteners::M3Bolt;
//! use efficio::{Length, Object};
//!
//! let bolt = M3Bolt::new(Length::millimeters(13.0), false);
//! bolt.shape()?.write_stl("m3_bolt.stl")?;
//! # Ok::<(), efficio::CadError>(())
//! ```

use thiserror::Error;

pub mod buttons;
pub mod container;
pub mod export;
pub mod fasteners;
pub mod gears;
pub mod measure;
pub mod primitives;
pub mod shape;

pub use export::View;
pub use measure::Length;
pub use shape::{centered_cube, centered_cylinder, rounded_cube, Bounds, Shape, TriangleMesh};

/// Errors returned by CAD operations.
#[derive(Error, Debug)]
pub enum CadError {
    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The geometry is empty (no vertices or triangles).
    #[error("Empty geometry")]
    EmptyGeometry,
    /// The requested operation is not available for this part.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
    /// A parameter value is out of range or unparseable.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// PNG encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A parametric part that can produce kernel geometry.
///
/// `shape` constructs the part's solid. `cut` optionally yields the negative
/// space a host solid should subtract before embedding the part — a bolt
/// channel, for instance, reports its clearance column here.
pub trait Object {
    /// Construct the solid geometry for this part.
    fn shape(&self) -> Result<Shape, CadError>;

    /// The clearance volume to carve out of a host solid, if any.
    fn cut(&self) -> Result<Option<Shape>, CadError> {
        Ok(None)
    }
}
