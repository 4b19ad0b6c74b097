//! Orbit camera: drag to rotate, wheel or keys to zoom, always looking at a
//! fixed target.
//!
//! State is spherical: `radius` from the target, unbounded azimuth `theta`, and
//! polar angle `phi` measured from +Y. `phi` stays away from the poles so the
//! look-at basis never degenerates. View and projection are derived fresh every
//! frame from the current state and aspect ratio.

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};
use planetoid_config::CameraConfig;
use planetoid_input::{KeyboardState, MouseState};
use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Smallest allowed polar angle.
pub const PHI_MIN: f32 = 0.1;
/// Largest allowed polar angle.
pub const PHI_MAX: f32 = PI - 0.1;

const ROTATE_LEFT: [KeyCode; 2] = [KeyCode::ArrowLeft, KeyCode::KeyA];
const ROTATE_RIGHT: [KeyCode; 2] = [KeyCode::ArrowRight, KeyCode::KeyD];
const TILT_UP: [KeyCode; 2] = [KeyCode::ArrowUp, KeyCode::KeyW];
const TILT_DOWN: [KeyCode; 2] = [KeyCode::ArrowDown, KeyCode::KeyS];
const ZOOM_IN: [KeyCode; 2] = [KeyCode::Equal, KeyCode::PageUp];
const ZOOM_OUT: [KeyCode; 2] = [KeyCode::Minus, KeyCode::PageDown];

/// The externally visible camera parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Horizontal angle in radians.
    pub theta: f32,
    /// Polar angle in radians, within `[PHI_MIN, PHI_MAX]`.
    pub phi: f32,
    /// Distance from the target.
    pub radius: f32,
}

/// Partial update for [`OrbitCamera::set_state`]. `None` fields are untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraStateUpdate {
    /// New horizontal angle.
    pub theta: Option<f32>,
    /// New polar angle, clamped.
    pub phi: Option<f32>,
    /// New radius, clamped.
    pub radius: Option<f32>,
}

/// Spherical orbit camera around a fixed look-at target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    theta: f32,
    phi: f32,
    radius: f32,
    /// Look-at point.
    pub target: Vec3,
    min_radius: f32,
    max_radius: f32,
    drag_sensitivity: f32,
    wheel_zoom_speed: f32,
    key_rotate_speed: f32,
    key_zoom_speed: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
    view: Mat4,
    projection: Mat4,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitCamera {
    /// Build a camera from config, clamping the starting state.
    pub fn from_config(config: &CameraConfig) -> Self {
        let min_radius = config.min_radius.min(config.max_radius);
        let max_radius = config.max_radius.max(config.min_radius);
        let mut cam = Self {
            theta: 0.0,
            phi: PHI_MIN,
            radius: min_radius,
            target: Vec3::ZERO,
            min_radius,
            max_radius,
            drag_sensitivity: config.drag_sensitivity,
            wheel_zoom_speed: config.wheel_zoom_speed,
            key_rotate_speed: config.key_rotate_speed,
            key_zoom_speed: config.key_zoom_speed,
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
            aspect_ratio: 16.0 / 9.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        cam.set_state(CameraStateUpdate {
            theta: Some(config.theta),
            phi: Some(config.phi),
            radius: Some(config.radius),
        });
        cam.update_matrices();
        cam
    }

    /// Current `{theta, phi, radius}`.
    pub fn state(&self) -> CameraState {
        CameraState {
            theta: self.theta,
            phi: self.phi,
            radius: self.radius,
        }
    }

    /// Overwrite any subset of the state, applying the same clamps as input.
    /// Non-finite values are ignored.
    pub fn set_state(&mut self, update: CameraStateUpdate) {
        if let Some(theta) = update.theta.filter(|v| v.is_finite()) {
            self.theta = theta;
        }
        if let Some(phi) = update.phi.filter(|v| v.is_finite()) {
            self.phi = phi.clamp(PHI_MIN, PHI_MAX);
        }
        if let Some(radius) = update.radius.filter(|v| v.is_finite()) {
            self.radius = radius.clamp(self.min_radius, self.max_radius);
        }
    }

    /// Zoom bounds `(min, max)`.
    pub fn radius_bounds(&self) -> (f32, f32) {
        (self.min_radius, self.max_radius)
    }

    /// Rotate by a drag of `delta` pixels.
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.theta += delta.x * self.drag_sensitivity;
        self.phi = (self.phi - delta.y * self.drag_sensitivity).clamp(PHI_MIN, PHI_MAX);
    }

    /// Change the radius by `amount` (negative zooms in), clamped.
    pub fn apply_zoom(&mut self, amount: f32) {
        if amount.is_finite() {
            self.radius = (self.radius + amount).clamp(self.min_radius, self.max_radius);
        }
    }

    /// Update the aspect ratio. A zero-sized viewport keeps the previous ratio.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
            tracing::debug!(aspect = self.aspect_ratio, "camera aspect ratio updated");
        }
    }

    /// Current aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Eye position: `target + (r sin(phi) cos(theta), r cos(phi), r sin(phi) sin(theta))`.
    pub fn eye_position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                self.radius * sin_phi * cos_theta,
                self.radius * cos_phi,
                self.radius * sin_phi * sin_theta,
            )
    }

    /// Recompute view and projection from the current state.
    pub fn update_matrices(&mut self) {
        self.view = Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y);
        self.projection = Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far);
    }

    /// View matrix as of the last [`update_matrices`](Self::update_matrices).
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix as of the last [`update_matrices`](Self::update_matrices).
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Rotate from a left-button drag.
///
/// Horizontal motion adjusts `theta`, vertical motion adjusts `phi` (clamped).
pub fn orbit_drag_system(mouse: &MouseState, cam: &mut OrbitCamera) {
    let delta = mouse.drag_delta(MouseButton::Left);
    if delta != Vec2::ZERO {
        cam.apply_drag(delta);
    }
}

/// Zoom from the wheel, scaled by `dt`. Scrolling up moves the eye closer.
pub fn orbit_zoom_system(mouse: &MouseState, cam: &mut OrbitCamera, dt: f32) {
    let scroll = mouse.scroll();
    if scroll.abs() < 1e-6 {
        return;
    }
    cam.apply_zoom(-scroll * cam.wheel_zoom_speed * dt);
}

/// Continuous rotation and zoom from held keys, scaled by `dt`.
pub fn orbit_keyboard_system(keyboard: &KeyboardState, cam: &mut OrbitCamera, dt: f32) {
    let yaw = keyboard.axis(&ROTATE_LEFT, &ROTATE_RIGHT);
    let tilt = keyboard.axis(&TILT_UP, &TILT_DOWN);
    let zoom = keyboard.axis(&ZOOM_IN, &ZOOM_OUT);

    if yaw != 0.0 {
        cam.theta += yaw * cam.key_rotate_speed * dt;
    }
    if tilt != 0.0 {
        cam.phi = (cam.phi + tilt * cam.key_rotate_speed * dt).clamp(PHI_MIN, PHI_MAX);
    }
    if zoom != 0.0 {
        cam.apply_zoom(zoom * cam.key_zoom_speed * dt);
    }
}

/// Run all input systems for one frame and refresh the matrices.
pub fn update_orbit_camera(
    cam: &mut OrbitCamera,
    mouse: &MouseState,
    keyboard: &KeyboardState,
    dt: f32,
) {
    orbit_drag_system(mouse, cam);
    orbit_zoom_system(mouse, cam, dt);
    orbit_keyboard_system(keyboard, cam, dt);
    cam.update_matrices();
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetoid_input::RawKeyEvent;
    use winit::event::{ElementState, MouseScrollDelta};

    fn drag(mouse: &mut MouseState, from: (f64, f64), to: (f64, f64)) {
        mouse.on_cursor_moved(from.0, from.1);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(to.0, to.1);
    }

    #[test]
    fn test_default_state_comes_from_config() {
        let cam = OrbitCamera::default();
        let cfg = CameraConfig::default();
        let s = cam.state();
        assert_eq!(s.radius, cfg.radius);
        assert_eq!(s.phi, cfg.phi);
        assert_eq!(s.theta, cfg.theta);
    }

    #[test]
    fn test_set_phi_out_of_range_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.set_state(CameraStateUpdate {
            phi: Some(10.0),
            ..Default::default()
        });
        assert_eq!(cam.state().phi, PI - 0.1);

        cam.set_state(CameraStateUpdate {
            phi: Some(-3.0),
            ..Default::default()
        });
        assert_eq!(cam.state().phi, 0.1);
    }

    #[test]
    fn test_set_radius_is_clamped_and_nan_ignored() {
        let mut cam = OrbitCamera::default();
        cam.set_state(CameraStateUpdate {
            radius: Some(1000.0),
            ..Default::default()
        });
        assert_eq!(cam.state().radius, 20.0);

        cam.set_state(CameraStateUpdate {
            radius: Some(f32::NAN),
            theta: Some(f32::INFINITY),
            ..Default::default()
        });
        assert_eq!(cam.state().radius, 20.0);
        assert!(cam.state().theta.is_finite());
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let mut cam = OrbitCamera::default();
        let before = cam.state();
        cam.set_state(CameraStateUpdate {
            theta: Some(2.5),
            ..Default::default()
        });
        let after = cam.state();
        assert_eq!(after.theta, 2.5);
        assert_eq!(after.phi, before.phi);
        assert_eq!(after.radius, before.radius);
    }

    #[test]
    fn test_drag_rotates_theta_and_phi() {
        let mut cam = OrbitCamera::default();
        let before = cam.state();
        let mut mouse = MouseState::new();
        drag(&mut mouse, (100.0, 100.0), (140.0, 80.0));
        update_orbit_camera(&mut cam, &mouse, &KeyboardState::new(), 1.0 / 60.0);

        let after = cam.state();
        assert!((after.theta - (before.theta + 40.0 * 0.005)).abs() < 1e-5);
        assert!((after.phi - (before.phi + 20.0 * 0.005)).abs() < 1e-5);
    }

    #[test]
    fn test_move_without_press_does_not_rotate() {
        let mut cam = OrbitCamera::default();
        let before = cam.state();
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_cursor_moved(300.0, 300.0);
        update_orbit_camera(&mut cam, &mouse, &KeyboardState::new(), 1.0 / 60.0);
        assert_eq!(cam.state(), before);
    }

    #[test]
    fn test_extreme_drag_keeps_phi_in_bounds() {
        let mut cam = OrbitCamera::default();
        for dy in [-1.0e6_f32, 1.0e6, -37.0, 5.0e3] {
            cam.apply_drag(Vec2::new(13.0, dy));
            let phi = cam.state().phi;
            assert!((PHI_MIN..=PHI_MAX).contains(&phi), "phi = {phi}");
        }
    }

    #[test]
    fn test_wheel_zooms_and_clamps() {
        let mut cam = OrbitCamera::default();
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        update_orbit_camera(&mut cam, &mouse, &KeyboardState::new(), 1.0 / 60.0);
        assert!((cam.state().radius - (8.0 - 1.2)).abs() < 1e-5);

        mouse.clear_transients();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 500.0));
        update_orbit_camera(&mut cam, &mouse, &KeyboardState::new(), 1.0 / 60.0);
        assert_eq!(cam.state().radius, 3.0);
    }

    #[test]
    fn test_wheel_zoom_scales_with_dt() {
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));

        let mut fast = OrbitCamera::default();
        orbit_zoom_system(&mouse, &mut fast, 1.0 / 120.0);
        let mut slow = OrbitCamera::default();
        orbit_zoom_system(&mouse, &mut slow, 1.0 / 30.0);

        let fast_step = 8.0 - fast.state().radius;
        let slow_step = 8.0 - slow.state().radius;
        assert!((fast_step - 0.3).abs() < 1e-5);
        assert!((slow_step - 4.0 * fast_step).abs() < 1e-5);

        let mut idle = OrbitCamera::default();
        orbit_zoom_system(&mouse, &mut idle, 0.0);
        assert_eq!(idle.state().radius, 8.0);
    }

    #[test]
    fn test_held_keys_scale_with_dt() {
        let mut cam = OrbitCamera::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::new(KeyCode::ArrowRight, ElementState::Pressed));
        kb.process_raw(RawKeyEvent::new(KeyCode::Minus, ElementState::Pressed));
        let before = cam.state();
        update_orbit_camera(&mut cam, &MouseState::new(), &kb, 0.5);
        let after = cam.state();
        assert!((after.theta - (before.theta + 0.75)).abs() < 1e-5);
        assert!((after.radius - (before.radius + 3.0)).abs() < 1e-5);
    }

    #[test]
    fn test_held_tilt_never_leaves_bounds() {
        let mut cam = OrbitCamera::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::new(KeyCode::KeyS, ElementState::Pressed));
        for _ in 0..600 {
            update_orbit_camera(&mut cam, &MouseState::new(), &kb, 1.0 / 30.0);
            let s = cam.state();
            assert!((PHI_MIN..=PHI_MAX).contains(&s.phi));
            assert!((3.0..=20.0).contains(&s.radius));
        }
        assert_eq!(cam.state().phi, PHI_MAX);
    }

    #[test]
    fn test_eye_position_spherical() {
        let mut cam = OrbitCamera::default();
        cam.set_state(CameraStateUpdate {
            theta: Some(0.0),
            phi: Some(PI / 2.0),
            radius: Some(5.0),
        });
        let eye = cam.eye_position();
        assert!((eye - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_places_target_in_front() {
        let mut cam = OrbitCamera::default();
        cam.update_matrices();
        let target_view = cam.view().transform_point3(cam.target);
        assert!(target_view.z < 0.0);
        assert!((target_view.z.abs() - cam.state().radius).abs() < 1e-3);
        assert!(target_view.x.abs() < 1e-4 && target_view.y.abs() < 1e-4);
    }

    #[test]
    fn test_projection_follows_aspect_ratio() {
        let mut cam = OrbitCamera::default();
        cam.set_aspect_ratio(800.0, 800.0);
        cam.update_matrices();
        let square = cam.projection();
        cam.set_aspect_ratio(1600.0, 800.0);
        cam.update_matrices();
        let wide = cam.projection();
        assert!((square.x_axis.x - 2.0 * wide.x_axis.x).abs() < 1e-5);

        cam.set_aspect_ratio(0.0, 800.0);
        assert_eq!(cam.aspect_ratio(), 2.0);
    }
}
