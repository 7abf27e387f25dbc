//! Scene model for the Meridian viewer.
//!
//! Everything here is plain data and pure functions: mesh descriptors, the
//! geometry builders that fill them, the camera matrices, the angle state
//! machine, and the viewport split. GPU upload and drawing live in the
//! viewer; this crate has no wgpu or winit dependency so the whole model is
//! unit-testable anywhere.

pub mod camera;
pub mod geometry;
pub mod mesh;
pub mod state;
pub mod viewport;

pub use camera::{camera_line_matrix, latitude_matrix, left_matrix, right_matrix};
pub use geometry::{axes, camera_line, circle, cube, Plane};
pub use mesh::{Mesh, VertexLayout};
pub use state::{AngleState, OrbitCommand};
pub use viewport::{split_scene, ViewportRect};
