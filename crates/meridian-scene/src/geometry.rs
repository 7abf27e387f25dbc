//! Static geometry builders.
//!
//! Pure and deterministic: no GPU handles, no I/O, just filled-in [`Mesh`]
//! descriptors. All sizes are in world units; the reference ring/axis radius
//! is [`RADIUS`].

use crate::mesh::{Mesh, VertexLayout};

/// Radius of the orientation rings and length of the axis/camera lines.
pub const RADIUS: f32 = 10.0;

/// Which plane a [`circle`] lies in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Plane {
    /// XZ plane — the equator ring around the cube.
    Equator,
    /// YZ plane — the latitude ring, drawn rotated to the current longitude.
    Latitude,
}

const RING_COLOR: [f32; 3] = [1.0, 0.0, 1.0];
const CAMERA_LINE_COLOR: [f32; 3] = [0.5, 1.0, 0.0];

/// Coordinate axes: three segments of length [`RADIUS`] from the origin
/// along +X, +Y, +Z, colored red, green, and blue respectively.
pub fn axes() -> Mesh {
    #[rustfmt::skip]
    let data = vec![
        0.0, 0.0, 0.0,      1.0, 0.0, 0.0,
        RADIUS, 0.0, 0.0,   1.0, 0.0, 0.0,
        0.0, 0.0, 0.0,      0.0, 1.0, 0.0,
        0.0, RADIUS, 0.0,   0.0, 1.0, 0.0,
        0.0, 0.0, 0.0,      0.0, 0.0, 1.0,
        0.0, 0.0, RADIUS,   0.0, 0.0, 1.0,
    ];
    Mesh::new("axes", VertexLayout::PositionColor, data, None)
}

/// Camera-direction overlay: a single segment from the origin toward +Z.
pub fn camera_line() -> Mesh {
    let c = CAMERA_LINE_COLOR;
    #[rustfmt::skip]
    let data = vec![
        0.0, 0.0, 0.0,      c[0], c[1], c[2],
        0.0, 0.0, RADIUS,   c[0], c[1], c[2],
    ];
    Mesh::new("camera-line", VertexLayout::PositionColor, data, None)
}

/// A ring of radius [`RADIUS`] sampled every 10 degrees, 0..=360 inclusive.
///
/// Both endpoints are emitted, so vertex 0 and vertex 36 coincide and a
/// line-strip draw closes the loop.
pub fn circle(plane: Plane) -> Mesh {
    let mut data = Vec::with_capacity(37 * VertexLayout::PositionColor.stride());
    for deg in (0..=360).step_by(10) {
        let rad = (deg as f32).to_radians();
        let (a, b) = (RADIUS * rad.cos(), RADIUS * rad.sin());
        let pos = match plane {
            Plane::Equator => [a, 0.0, b],
            Plane::Latitude => [0.0, a, b],
        };
        data.extend_from_slice(&pos);
        data.extend_from_slice(&RING_COLOR);
    }
    let label = match plane {
        Plane::Equator => "equator",
        Plane::Latitude => "latitude-ring",
    };
    Mesh::new(label, VertexLayout::PositionColor, data, None)
}

/// A unit cube (side 2, centered at the origin) with per-face texture
/// coordinates.
///
/// 24 vertices (4 per face, unshared so each face gets its own UV quad) and
/// 36 indices. Each face maps to one cell of a 4x4 grid over the source
/// image; the cell assignment below is load-bearing — it decides which part
/// of the image shows on which face. Note the left face reads from the
/// v=[0.75,1.0] row and the back face from the v=[0.25,0.5] row, unlike the
/// other four faces which share the v=[0.5,0.75] row.
pub fn cube() -> Mesh {
    // Face order: front, right, up, left, down, back.
    #[rustfmt::skip]
    const POSITIONS: [[f32; 3]; 24] = [
        [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
        [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0],
        [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0],
        [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0],
        [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],
        [ 1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0],
    ];

    #[rustfmt::skip]
    const UVS: [[f32; 2]; 24] = [
        // front
        [0.00, 0.50], [0.25, 0.50], [0.25, 0.75], [0.00, 0.75],
        // right
        [0.25, 0.50], [0.50, 0.50], [0.50, 0.75], [0.25, 0.75],
        // up
        [0.50, 0.50], [0.75, 0.50], [0.75, 0.75], [0.50, 0.75],
        // left (row above the band the other faces use)
        [0.50, 0.75], [0.75, 0.75], [0.75, 1.00], [0.50, 1.00],
        // down
        [0.75, 0.50], [1.00, 0.50], [1.00, 0.75], [0.75, 0.75],
        // back (row below)
        [0.50, 0.25], [0.75, 0.25], [0.75, 0.50], [0.50, 0.50],
    ];

    let mut data = Vec::with_capacity(24 * VertexLayout::PositionUv.stride());
    for (pos, uv) in POSITIONS.iter().zip(UVS.iter()) {
        data.extend_from_slice(pos);
        data.extend_from_slice(uv);
    }

    let mut indices = Vec::with_capacity(36);
    for face in 0..6u16 {
        let base = face * 4;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new("cube", VertexLayout::PositionUv, data, Some(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── circles ───────────────────────────────────────────────────────────

    #[test]
    fn circle_has_37_points() {
        for plane in [Plane::Equator, Plane::Latitude] {
            assert_eq!(circle(plane).vertex_count, 37);
        }
    }

    #[test]
    fn circle_first_and_last_points_coincide() {
        for plane in [Plane::Equator, Plane::Latitude] {
            let m = circle(plane);
            let stride = m.layout.stride();
            let first = &m.vertex_data[0..3];
            let last = &m.vertex_data[36 * stride..36 * stride + 3];
            assert_eq!(first, last);
        }
    }

    #[test]
    fn equator_lies_in_xz_plane() {
        let m = circle(Plane::Equator);
        let stride = m.layout.stride();
        for v in 0..m.vertex_count {
            assert_eq!(m.vertex_data[v * stride + 1], 0.0);
        }
    }

    #[test]
    fn latitude_ring_lies_in_yz_plane() {
        let m = circle(Plane::Latitude);
        let stride = m.layout.stride();
        for v in 0..m.vertex_count {
            assert_eq!(m.vertex_data[v * stride], 0.0);
        }
    }

    // ── cube ──────────────────────────────────────────────────────────────

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let m = cube();
        assert_eq!(m.vertex_count, 24);
        assert_eq!(m.index_data.as_ref().map(Vec::len), Some(36));
    }

    #[test]
    fn cube_indices_in_range() {
        let m = cube();
        assert!(m.index_data.unwrap().iter().all(|&i| i < 24));
        assert!(cube().validate().is_none());
    }

    #[test]
    fn cube_off_row_faces_keep_their_atlas_cells() {
        let m = cube();
        let stride = m.layout.stride();
        let uv = |v: usize| [m.vertex_data[v * stride + 3], m.vertex_data[v * stride + 4]];
        // Left face (vertices 12..16) reads the top row.
        assert_eq!(uv(12), [0.50, 0.75]);
        assert_eq!(uv(14), [0.75, 1.00]);
        // Back face (vertices 20..24) reads the bottom row.
        assert_eq!(uv(20), [0.50, 0.25]);
        assert_eq!(uv(22), [0.75, 0.50]);
    }

    // ── lines ─────────────────────────────────────────────────────────────

    #[test]
    fn axes_are_three_colored_segments() {
        let m = axes();
        assert_eq!(m.vertex_count, 6);
        let stride = m.layout.stride();
        // Endpoint of each segment sits RADIUS along its own axis.
        assert_eq!(m.vertex_data[stride], RADIUS);
        assert_eq!(m.vertex_data[3 * stride + 1], RADIUS);
        assert_eq!(m.vertex_data[5 * stride + 2], RADIUS);
    }

    #[test]
    fn camera_line_points_along_positive_z() {
        let m = camera_line();
        assert_eq!(m.vertex_count, 2);
        assert_eq!(&m.vertex_data[6..9], &[0.0, 0.0, RADIUS]);
    }

    #[test]
    fn builders_satisfy_stride_invariant() {
        for m in [axes(), camera_line(), circle(Plane::Equator), cube()] {
            assert!(m.validate().is_none(), "{}: {:?}", m.label, m.validate());
        }
    }
}
