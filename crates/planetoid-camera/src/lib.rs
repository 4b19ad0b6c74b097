//! Orbit camera controller: spherical camera state, input handling, and
//! per-frame view/projection matrices.

pub mod orbit_camera;

pub use orbit_camera::{
    CameraState, CameraStateUpdate, OrbitCamera, PHI_MAX, PHI_MIN, orbit_drag_system,
    orbit_keyboard_system, orbit_zoom_system, update_orbit_camera,
};
