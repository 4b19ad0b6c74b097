//! Trails of removed orbs, kept alive long enough to fade out.

use glam::Vec3;

use crate::orb::{OrbEntity, OrbId};

/// Snapshot of a removed orb's trail, fading toward removal.
#[derive(Debug, Clone)]
pub struct RetiredTrail {
    /// Orb the trail belonged to.
    pub source: OrbId,
    /// Trail points, oldest first.
    pub points: Vec<Vec3>,
    /// Visual size of the orb that left the trail.
    pub size: f32,
    /// Trail color.
    pub color: [f32; 3],
    /// Opacity multiplier in `[0, 1]`.
    pub alpha_scale: f32,
    /// Seconds left before discard.
    pub fade: f32,
    /// Fade length the trail started with.
    pub initial_fade: f32,
    /// Seconds since retirement, summed in f64 so 60 Hz steps land on the
    /// fade length without drift.
    pub elapsed: f64,
    /// Set whenever `alpha_scale` changes.
    pub dirty: bool,
}

impl RetiredTrail {
    /// Snapshot `orb`'s trail at full opacity.
    pub fn from_orb(orb: &OrbEntity, fade_secs: f32) -> Self {
        Self {
            source: orb.id(),
            points: orb.trail().points().to_vec(),
            size: orb.size,
            color: orb.color,
            alpha_scale: 1.0,
            fade: fade_secs,
            initial_fade: fade_secs,
            elapsed: 0.0,
            dirty: true,
        }
    }
}

/// Retired trails in retirement order.
#[derive(Debug, Clone, Default)]
pub struct RetiredTrails {
    trails: Vec<RetiredTrail>,
}

impl RetiredTrails {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire `orb`'s trail with a fade of `fade_secs`.
    pub fn retire(&mut self, orb: &OrbEntity, fade_secs: f32) {
        tracing::debug!(
            orb = %orb.id(),
            points = orb.trail().points().len(),
            "retiring trail"
        );
        self.trails.push(RetiredTrail::from_orb(orb, fade_secs));
    }

    /// Advance every fade by `dt`. A trail is dropped once its total elapsed
    /// time reaches `initial_fade`; the rest get `alpha_scale = fade / initial_fade`.
    ///
    /// Returns how many trails were discarded.
    pub fn update(&mut self, dt: f32) -> usize {
        let before = self.trails.len();
        for trail in &mut self.trails {
            trail.elapsed += f64::from(dt);
            trail.fade = (f64::from(trail.initial_fade) - trail.elapsed).max(0.0) as f32;
        }
        self.trails.retain(|t| !faded_out(t));
        for trail in &mut self.trails {
            trail.alpha_scale = if trail.initial_fade > 0.0 {
                (trail.fade / trail.initial_fade).clamp(0.0, 1.0)
            } else {
                0.0
            };
            trail.dirty = true;
        }
        let discarded = before - self.trails.len();
        if discarded > 0 {
            tracing::debug!(discarded, remaining = self.trails.len(), "retired trails faded out");
        }
        discarded
    }

    /// Live retired trails.
    pub fn as_slice(&self) -> &[RetiredTrail] {
        &self.trails
    }

    /// Number of trails still fading.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Whether nothing is fading.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Clear every dirty flag after the renderer consumed them.
    pub fn mark_clean(&mut self) {
        for trail in &mut self.trails {
            trail.dirty = false;
        }
    }
}

/// Summing `f32` frame deltas overshoots or undershoots the exact total by a
/// few ulps; anything that close to the fade length counts as elapsed.
const FADE_TOLERANCE: f64 = 1e-6;

fn faded_out(trail: &RetiredTrail) -> bool {
    let total = f64::from(trail.initial_fade);
    trail.elapsed + FADE_TOLERANCE * total.max(1.0) >= total
}
