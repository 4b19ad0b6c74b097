//! Serializable per-frame view of the simulation for external renderers.

use glam::Vec3;
use planetoid_camera::CameraState;
use serde::Serialize;

use crate::orb::{OrbEntity, OrbId};
use crate::retired::RetiredTrail;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    /// Simulation frames advanced so far.
    pub frame: u64,
    /// Simulated seconds so far.
    pub elapsed: f64,
    pub camera: CameraSnapshot,
    pub orbs: Vec<OrbSnapshot>,
    pub retired: Vec<RetiredSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraSnapshot {
    #[serde(flatten)]
    pub state: CameraState,
    pub eye: Vec3,
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbSnapshot {
    pub id: OrbId,
    pub name: String,
    pub chaser: bool,
    pub target: Option<OrbId>,
    pub position: Vec3,
    pub state: &'static str,
    pub size: f32,
    pub color: [f32; 3],
    pub trail: Vec<Vec3>,
    /// Trail changed since the renderer last marked it clean.
    pub trail_dirty: bool,
}

impl From<&OrbEntity> for OrbSnapshot {
    fn from(orb: &OrbEntity) -> Self {
        Self {
            id: orb.id(),
            name: orb.display_name(),
            chaser: orb.is_chaser(),
            target: orb.chase_target(),
            position: orb.position(),
            state: orb.state.label(),
            size: orb.size,
            color: orb.color,
            trail: orb.trail().points().to_vec(),
            trail_dirty: orb.trail().is_dirty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RetiredSnapshot {
    pub source: OrbId,
    pub alpha_scale: f32,
    pub fade: f32,
    pub size: f32,
    pub color: [f32; 3],
    pub points: Vec<Vec3>,
}

impl From<&RetiredTrail> for RetiredSnapshot {
    fn from(trail: &RetiredTrail) -> Self {
        Self {
            source: trail.source,
            alpha_scale: trail.alpha_scale,
            fade: trail.fade,
            size: trail.size,
            color: trail.color,
            points: trail.points.clone(),
        }
    }
}
