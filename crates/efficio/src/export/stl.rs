//! Binary STL export.

use std::fs;
use std::path::Path;

use crate::{CadError, Shape};

/// Assemble binary STL bytes for a shape.
///
/// Facet normals are recomputed from the triangle winding; degenerate
/// triangles fall back to +Z.
pub fn to_stl_bytes(shape: &Shape) -> Result<Vec<u8>, CadError> {
    let mesh = shape.to_mesh();
    if mesh.indices.is_empty() {
        return Err(CadError::EmptyGeometry);
    }

    let vertices = &mesh.vertices;
    let num_triangles = mesh.indices.len() / 3;
    tracing::debug!(triangles = num_triangles, "assembling binary STL");
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    // 80-byte header
    let mut header = [b' '; 80];
    let tag = b"efficio STL export";
    header[..tag.len()].copy_from_slice(tag);
    data.extend_from_slice(&header);
    // Number of triangles
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.indices.chunks(3) {
        let i0 = tri[0] as usize * 3;
        let i1 = tri[1] as usize * 3;
        let i2 = tri[2] as usize * 3;

        let v0 = [vertices[i0], vertices[i0 + 1], vertices[i0 + 2]];
        let v1 = [vertices[i1], vertices[i1 + 1], vertices[i1 + 2]];
        let v2 = [vertices[i2], vertices[i2 + 1], vertices[i2 + 2]];

        // Compute normal
        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        let (nx, ny, nz) = if len > 1e-10 {
            (nx / len, ny / len, nz / len)
        } else {
            (0.0, 0.0, 1.0)
        };

        // Normal
        data.extend_from_slice(&nx.to_le_bytes());
        data.extend_from_slice(&ny.to_le_bytes());
        data.extend_from_slice(&nz.to_le_bytes());
        // Vertices
        for v in [v0, v1, v2] {
            data.extend_from_slice(&v[0].to_le_bytes());
            data.extend_from_slice(&v[1].to_le_bytes());
            data.extend_from_slice(&v[2].to_le_bytes());
        }
        // Attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(data)
}

/// Write a shape to a binary STL file.
pub fn export_stl(shape: &Shape, path: impl AsRef<Path>) -> Result<(), CadError> {
    let bytes = to_stl_bytes(shape)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stl_layout() {
        let cube = Shape::cube(10.0, 10.0, 10.0);
        let bytes = to_stl_bytes(&cube).unwrap();
        assert!(bytes.starts_with(b"efficio STL export"));
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap()) as usize;
        assert_eq!(bytes.len(), 84 + count * 50);
        assert_eq!(count, cube.num_triangles());
        assert!(count >= 12);
    }

    #[test]
    fn test_empty_shape_is_rejected() {
        assert!(matches!(
            to_stl_bytes(&Shape::empty()),
            Err(CadError::EmptyGeometry)
        ));
    }
}
