//! View/projection matrices for the two viewports and the overlays.
//!
//! Four matrices are rebuilt from [`AngleState`] on every frame. They are
//! pure functions returning fresh values; nothing here is cached or shared
//! between frames.
//!
//! Composition is column-vector and right-to-left: in
//! `projection * view * rotation`, the rotation applies to geometry first.
//! Projections target wgpu clip space (depth 0..1).

use glam::{Mat4, Vec3};

use crate::geometry::RADIUS;
use crate::state::AngleState;

/// Fixed eye position for the orthographic (left) view.
pub const EYE: Vec3 = Vec3::new(5.0, 2.0, 10.0);

/// Near clip plane distance, shared by both projections.
pub const NEAR: f32 = 1.0;
/// Far clip plane distance, shared by both projections.
pub const FAR: f32 = 500.0;

/// Half-extent of the orthographic view volume.
const ORTHO_BOUND: f32 = 10.0;
/// Vertical field of view of the perspective (right) view, in degrees.
const FOV_Y_DEG: f32 = 45.0;

/// Orthographic projection and fixed look-at shared by the left viewport and
/// both overlays.
fn left_base() -> Mat4 {
    let ortho = Mat4::orthographic_rh(
        -ORTHO_BOUND,
        ORTHO_BOUND,
        -ORTHO_BOUND,
        ORTHO_BOUND,
        NEAR,
        FAR,
    );
    ortho * Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
}

/// MVP for the left (orthographic) viewport. Independent of the angle state.
pub fn left_matrix() -> Mat4 {
    left_base()
}

/// MVP for the right (perspective) viewport.
///
/// The cube is pushed back along -Z and then rotated by the current latitude
/// (about X) and longitude (about Y), so it appears to orbit the fixed
/// camera as the angles change.
pub fn right_matrix(state: AngleState, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, NEAR, FAR)
        * Mat4::from_translation(Vec3::new(0.0, 0.0, -RADIUS))
        * Mat4::from_rotation_x((state.latitude as f32).to_radians())
        * Mat4::from_rotation_y((state.longitude as f32).to_radians())
}

/// MVP for the camera-direction overlay in the left viewport.
///
/// Sign-inverted relative to [`right_matrix`]: the overlay shows where the
/// right view's camera points, as seen from the fixed left view.
pub fn camera_line_matrix(state: AngleState) -> Mat4 {
    left_base()
        * Mat4::from_rotation_x((-state.latitude as f32).to_radians())
        * Mat4::from_rotation_y((-state.longitude as f32).to_radians())
}

/// MVP for the latitude ring in the left viewport.
///
/// Only the longitude rotation applies: the ring swings to face the current
/// longitude but does not tilt.
pub fn latitude_matrix(state: AngleState) -> Mat4 {
    left_base() * Mat4::from_rotation_y((-state.longitude as f32).to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn state(longitude: i32, latitude: i32) -> AngleState {
        AngleState {
            longitude,
            latitude,
        }
    }

    #[test]
    fn right_matrix_at_origin_is_projection_and_translation_only() {
        let expected = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), 1.5, NEAR, FAR)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -RADIUS));
        assert!(right_matrix(state(0, 0), 1.5).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn camera_line_matrix_carries_inverted_longitude() {
        let expected = left_base() * Mat4::from_rotation_y((-90.0f32).to_radians());
        assert!(camera_line_matrix(state(90, 0)).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn latitude_matrix_ignores_latitude() {
        let a = latitude_matrix(state(45, 0));
        let b = latitude_matrix(state(45, 60));
        assert!(a.abs_diff_eq(b, EPS));
    }

    #[test]
    fn overlays_at_origin_match_left_view() {
        let left = left_matrix();
        assert!(camera_line_matrix(state(0, 0)).abs_diff_eq(left, EPS));
        assert!(latitude_matrix(state(0, 0)).abs_diff_eq(left, EPS));
    }

    #[test]
    fn rotation_order_is_latitude_then_longitude() {
        // The two rotations do not commute; the composed matrix must match
        // the x-then-y order exactly.
        let s = state(90, 45);
        let expected = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), 2.0, NEAR, FAR)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -RADIUS))
            * Mat4::from_rotation_x(45.0f32.to_radians())
            * Mat4::from_rotation_y(90.0f32.to_radians());
        assert!(right_matrix(s, 2.0).abs_diff_eq(expected, EPS));

        let swapped = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), 2.0, NEAR, FAR)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -RADIUS))
            * Mat4::from_rotation_y(90.0f32.to_radians())
            * Mat4::from_rotation_x(45.0f32.to_radians());
        assert!(!right_matrix(s, 2.0).abs_diff_eq(swapped, EPS));
    }
}
