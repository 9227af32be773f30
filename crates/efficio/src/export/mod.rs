//! Export helpers: binary STL, SVG line drawings, PNG view sheets.
//!
//! Every exporter consumes the kernel's triangle mesh; nothing here reads
//! kernel internals. The SVG and PNG paths share the same orthographic
//! feature-edge projection.

pub mod png;
pub mod stl;
pub mod svg;

mod projection;

pub use png::{export_png, render_views};
pub use projection::View;
pub use stl::{export_stl, to_stl_bytes};
pub use svg::{export_svg, to_svg_string, SvgOptions};
