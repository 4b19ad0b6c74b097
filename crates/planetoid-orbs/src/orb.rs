//! Orb flight controller.
//!
//! Each orb alternates between cruise segments and pauses. A cruise eases the
//! angular speed, radius, and height toward randomly re-rolled targets; when
//! the segment timer runs out the orb either pauses (optionally with a teleport
//! partway through) or re-rolls a new segment. Independently of the state, the
//! orbital plane eases toward its target and two wobble phases perturb the
//! rendered radius and height without leaving the configured bounds.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec3;
use planetoid_config::OrbConfig;
use planetoid_math::{ease, orbit_position, random_unit_vector, unit_or};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::trail::{Trail, TrailAppend};

/// Smoothing rate for angular speed while cruising.
pub const SPEED_EASE_RATE: f32 = 2.0;
/// Smoothing rate for angular speed while braking into a pause.
pub const PAUSE_EASE_RATE: f32 = 3.0;
/// Smoothing rate for radius and height.
pub const ORBIT_EASE_RATE: f32 = 0.8;
/// Smoothing rate for the orbital plane normal.
pub const PLANE_EASE_RATE: f32 = 0.6;
/// Relative amplitude of the cruise speed jitter.
pub const SPEED_JITTER: f32 = 0.15;
/// Phase rates of the two wobble accumulators, rad/s.
pub const WOBBLE_RATES: [f32; 2] = [1.3, 0.9];
/// Radius wobble amplitude.
pub const WOBBLE_RADIUS: f32 = 0.08;
/// Height wobble amplitude.
pub const WOBBLE_HEIGHT: f32 = 0.05;
/// A planned teleport fires once less than this fraction of the pause remains.
pub const TELEPORT_WINDOW: f32 = 0.4;

const ORB_PALETTE: [[f32; 3]; 6] = [
    [1.0, 0.78, 0.35],
    [0.45, 0.85, 1.0],
    [0.95, 0.45, 0.75],
    [0.55, 1.0, 0.6],
    [0.8, 0.6, 1.0],
    [1.0, 0.55, 0.4],
];

/// Stable orb identifier. Never reused within a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbId(pub u32);

impl fmt::Display for OrbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Progress of the teleport attached to a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeleportPlan {
    /// This pause does not teleport.
    None,
    /// Will teleport once the pause is far enough along.
    Planned,
    /// Already teleported during this pause.
    Done,
}

/// Top-level flight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightState {
    /// Flying a segment toward the current targets.
    Cruising {
        /// Seconds spent in this segment.
        segment_timer: f32,
        /// Seconds the segment lasts.
        segment_duration: f32,
    },
    /// Braking to a stop.
    Paused {
        /// Seconds left in the pause.
        remaining: f32,
        /// Total pause length.
        duration: f32,
        /// Teleport progress for this pause.
        teleport: TeleportPlan,
    },
}

impl FlightState {
    /// Short label for logs and snapshots.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cruising { .. } => "cruising",
            Self::Paused { .. } => "paused",
        }
    }

    /// Whether the orb is pausing.
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }
}

/// Whether an orb wanders on its own or pursues another orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbRole {
    /// Ordinary flight.
    Wanderer,
    /// Steers its orbital plane toward `target` while it is alive.
    Chaser {
        /// Orb being pursued. Cleared when that orb is removed.
        target: Option<OrbId>,
    },
}

/// Uniform sample in `[lo, hi]` that tolerates swapped or equal bounds.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    lo + (hi - lo) * rng.random::<f32>()
}

/// Bernoulli trial that never panics on out-of-range probabilities.
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}

/// One simulated orb.
#[derive(Debug, Clone)]
pub struct OrbEntity {
    id: OrbId,
    /// Orbital phase in radians, kept in `[0, TAU)`.
    pub(crate) angle: f32,
    /// Base radius before wobble.
    pub(crate) radius: f32,
    /// Base height offset before wobble.
    pub(crate) height: f32,
    /// Radius the cruise eases toward.
    pub(crate) target_radius: f32,
    /// Height the cruise eases toward.
    pub(crate) target_height: f32,
    /// Unit normal of the current orbital plane.
    pub(crate) plane_normal: Vec3,
    /// Normal the plane eases toward.
    pub(crate) target_plane_normal: Vec3,
    /// Sense of travel, `1.0` or `-1.0`.
    pub(crate) direction: f32,
    /// Current angular speed in rad/s (unsigned).
    pub(crate) angular_speed: f32,
    /// Cruise angular speed target in rad/s.
    pub(crate) target_angular_speed: f32,
    /// Flight sub-state.
    pub(crate) state: FlightState,
    /// Wobble phase accumulators (radius, height).
    pub(crate) wobble_phase: [f32; 2],
    render_radius: f32,
    render_height: f32,
    /// Wanderer or chaser.
    pub(crate) role: OrbRole,
    trail: Trail,
    /// Next trail append must be a break (set by teleports).
    pub(crate) skip_trail_interpolation: bool,
    /// Visual radius of the orb.
    pub(crate) size: f32,
    /// Linear RGB color.
    pub(crate) color: [f32; 3],
}

impl OrbEntity {
    /// Create an orb at a random position with a freshly rolled cruise segment.
    pub fn spawn<R: Rng + ?Sized>(id: OrbId, config: &OrbConfig, rng: &mut R) -> Self {
        let normal = random_unit_vector(rng);
        let radius = uniform(rng, config.min_radius, config.max_radius);
        let height = uniform(rng, config.min_height, config.max_height);
        let color = ORB_PALETTE[rng.random_range(0..ORB_PALETTE.len())];

        let mut orb = Self {
            id,
            angle: uniform(rng, 0.0, TAU),
            radius,
            height,
            target_radius: radius,
            target_height: height,
            plane_normal: normal,
            target_plane_normal: normal,
            direction: if chance(rng, 0.5) { 1.0 } else { -1.0 },
            angular_speed: 0.0,
            target_angular_speed: config.min_angular_speed,
            state: FlightState::Cruising {
                segment_timer: 0.0,
                segment_duration: 0.0,
            },
            wobble_phase: [uniform(rng, 0.0, TAU), uniform(rng, 0.0, TAU)],
            render_radius: radius,
            render_height: height,
            role: OrbRole::Wanderer,
            trail: Trail::new(config.trail_max),
            skip_trail_interpolation: false,
            size: uniform(rng, 0.05, 0.09),
            color,
        };
        orb.reroll_segment(config, rng);
        orb.refresh_render_values(config);
        orb
    }

    /// Stable identifier.
    pub fn id(&self) -> OrbId {
        self.id
    }

    /// Name shown in selection lists.
    pub fn display_name(&self) -> String {
        format!("Orb {}", self.id)
    }

    /// Whether the orb is a chaser, with or without a live target.
    pub fn is_chaser(&self) -> bool {
        matches!(self.role, OrbRole::Chaser { .. })
    }

    /// The pursued orb, if any.
    pub fn chase_target(&self) -> Option<OrbId> {
        match self.role {
            OrbRole::Chaser { target } => target,
            OrbRole::Wanderer => None,
        }
    }

    /// Radius actually used for the position, always within bounds.
    pub fn render_radius(&self) -> f32 {
        self.render_radius
    }

    /// Height actually used for the position, always within bounds.
    pub fn render_height(&self) -> f32 {
        self.render_height
    }

    /// Orbital phase in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Unit normal of the current orbital plane.
    pub fn plane_normal(&self) -> Vec3 {
        self.plane_normal
    }

    /// Sense of travel, `1.0` or `-1.0`.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Current angular speed in rad/s.
    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn role(&self) -> OrbRole {
        self.role
    }

    /// Visual radius of the orb.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Linear RGB color.
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    /// Adopt reloaded tuning: the trail is cut down to the new capacity and
    /// the render values are re-clamped to the new bounds.
    pub fn apply_config(&mut self, config: &OrbConfig) {
        self.trail.set_capacity(config.trail_max);
        self.refresh_render_values(config);
    }

    /// The recorded trail.
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub(crate) fn trail_mut(&mut self) -> &mut Trail {
        &mut self.trail
    }

    /// Current world position.
    pub fn position(&self) -> Vec3 {
        orbit_position(
            self.angle,
            self.render_radius,
            self.render_height,
            self.plane_normal,
        )
    }

    /// Advance the flight controller by `dt` seconds.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, config: &OrbConfig, rng: &mut R) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for (phase, rate) in self.wobble_phase.iter_mut().zip(WOBBLE_RATES) {
            *phase = (*phase + rate * dt).rem_euclid(TAU);
        }

        match self.state {
            FlightState::Cruising {
                segment_timer,
                segment_duration,
            } => {
                let jitter =
                    1.0 + SPEED_JITTER * (self.wobble_phase[0] + self.wobble_phase[1]).sin();
                self.angular_speed = ease(
                    self.angular_speed,
                    self.target_angular_speed * jitter,
                    SPEED_EASE_RATE,
                    dt,
                );
                self.advance_angle(dt);
                self.radius = ease(self.radius, self.target_radius, ORBIT_EASE_RATE, dt);
                self.height = ease(self.height, self.target_height, ORBIT_EASE_RATE, dt);

                let segment_timer = segment_timer + dt;
                if segment_timer >= segment_duration {
                    self.end_segment(config, rng);
                } else {
                    self.state = FlightState::Cruising {
                        segment_timer,
                        segment_duration,
                    };
                }
            }
            FlightState::Paused {
                remaining,
                duration,
                mut teleport,
            } => {
                self.angular_speed = ease(self.angular_speed, 0.0, PAUSE_EASE_RATE, dt);
                self.advance_angle(dt);

                let remaining = remaining - dt;
                if teleport == TeleportPlan::Planned && remaining < TELEPORT_WINDOW * duration {
                    self.teleport(config, rng);
                    teleport = TeleportPlan::Done;
                }
                if remaining <= 0.0 {
                    tracing::trace!(orb = %self.id, "pause over");
                    self.reroll_segment(config, rng);
                } else {
                    self.state = FlightState::Paused {
                        remaining,
                        duration,
                        teleport,
                    };
                }
            }
        }

        let fallback = unit_or(self.target_plane_normal, Vec3::Y);
        self.plane_normal = unit_or(
            ease(
                self.plane_normal,
                self.target_plane_normal,
                PLANE_EASE_RATE,
                dt,
            ),
            fallback,
        );
        self.refresh_render_values(config);
    }

    fn advance_angle(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * self.direction * dt).rem_euclid(TAU);
    }

    /// A cruise segment finished: pause or re-roll.
    fn end_segment<R: Rng + ?Sized>(&mut self, config: &OrbConfig, rng: &mut R) {
        if chance(rng, config.pause_chance) {
            let duration = uniform(rng, config.min_pause_secs, config.max_pause_secs);
            let teleport = if chance(rng, config.teleport_chance) {
                TeleportPlan::Planned
            } else {
                TeleportPlan::None
            };
            tracing::debug!(orb = %self.id, duration, ?teleport, "pausing");
            self.state = FlightState::Paused {
                remaining: duration,
                duration,
                teleport,
            };
        } else {
            self.reroll_segment(config, rng);
        }
    }

    /// Roll a new cruise segment and enter Cruising.
    pub fn reroll_segment<R: Rng + ?Sized>(&mut self, config: &OrbConfig, rng: &mut R) {
        if chance(rng, config.direction_flip_chance) {
            self.direction = -self.direction;
        }
        let segment_duration = uniform(rng, config.min_segment_secs, config.max_segment_secs);
        self.target_angular_speed =
            uniform(rng, config.min_angular_speed, config.max_angular_speed);
        self.target_radius = uniform(rng, config.min_radius, config.max_radius);
        self.target_height = uniform(rng, config.min_height, config.max_height);
        if chance(rng, config.replane_chance) {
            self.target_plane_normal = random_unit_vector(rng);
        }
        self.state = FlightState::Cruising {
            segment_timer: 0.0,
            segment_duration,
        };
    }

    /// Jump to a random new orbit. The next trail append is a break.
    pub fn teleport<R: Rng + ?Sized>(&mut self, config: &OrbConfig, rng: &mut R) {
        let normal = random_unit_vector(rng);
        self.plane_normal = normal;
        self.target_plane_normal = normal;
        self.angle = uniform(rng, 0.0, TAU);
        self.radius = uniform(rng, config.min_radius, config.max_radius);
        self.height = uniform(rng, config.min_height, config.max_height);
        self.target_radius = self.radius;
        self.target_height = self.height;
        self.skip_trail_interpolation = true;
        tracing::debug!(orb = %self.id, "teleported");
    }

    /// Recompute the wobbled, clamped render radius and height.
    pub fn refresh_render_values(&mut self, config: &OrbConfig) {
        self.render_radius = clamp_range(
            self.radius + WOBBLE_RADIUS * self.wobble_phase[0].sin(),
            config.min_radius,
            config.max_radius,
        );
        self.render_height = clamp_range(
            self.height + WOBBLE_HEIGHT * self.wobble_phase[1].sin(),
            config.min_height,
            config.max_height,
        );
    }

    /// Collision response for one side of a pair: push outward by `radial`,
    /// reverse direction, and shift the phase by `angle_delta`.
    pub(crate) fn deflect(&mut self, radial: f32, angle_delta: f32, config: &OrbConfig) {
        self.radius = clamp_range(self.radius + radial, config.min_radius, config.max_radius);
        self.render_radius = clamp_range(
            self.render_radius + radial,
            config.min_radius,
            config.max_radius,
        );
        self.direction = -self.direction;
        self.angle = (self.angle + angle_delta).rem_euclid(TAU);
    }

    /// Append this frame's position to the trail.
    pub fn record_trail(&mut self, config: &OrbConfig) -> TrailAppend {
        let p = self.position();
        let append = self.trail.record(
            p,
            config.trail_spacing,
            config.trail_break_distance,
            self.skip_trail_interpolation,
        );
        self.skip_trail_interpolation = false;
        append
    }
}

/// `clamp` that tolerates swapped bounds and maps NaN to the lower bound.
fn clamp_range(v: f32, lo: f32, hi: f32) -> f32 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn orb(seed: u64) -> (OrbEntity, OrbConfig, ChaCha8Rng) {
        let config = OrbConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let orb = OrbEntity::spawn(OrbId(1), &config, &mut rng);
        (orb, config, rng)
    }

    #[test]
    fn test_spawn_starts_cruising_within_bounds() {
        let (orb, config, _) = orb(1);
        assert!(matches!(orb.state, FlightState::Cruising { segment_timer, segment_duration }
            if segment_timer == 0.0 && segment_duration >= config.min_segment_secs));
        assert!((orb.plane_normal.length() - 1.0).abs() < 1e-5);
        assert!(orb.render_radius() >= config.min_radius);
        assert!(orb.render_radius() <= config.max_radius);
        assert!(orb.direction == 1.0 || orb.direction == -1.0);
        assert_eq!(orb.display_name(), "Orb 1");
        assert!(!orb.is_chaser());
    }

    #[test]
    fn test_cruise_advances_angle_in_direction() {
        let (mut orb, config, mut rng) = orb(2);
        orb.state = FlightState::Cruising {
            segment_timer: 0.0,
            segment_duration: 100.0,
        };
        orb.direction = 1.0;
        orb.angle = 1.0;
        orb.angular_speed = 1.0;
        orb.target_angular_speed = 1.0;
        orb.update(0.01, &config, &mut rng);
        assert!(orb.angle > 1.0);

        orb.direction = -1.0;
        let before = orb.angle;
        orb.update(0.01, &config, &mut rng);
        assert!(orb.angle < before);
    }

    #[test]
    fn test_segment_end_leaves_cruise_segment() {
        let (mut orb, config, mut rng) = orb(3);
        orb.state = FlightState::Cruising {
            segment_timer: 0.95,
            segment_duration: 1.0,
        };
        orb.update(0.1, &config, &mut rng);
        match orb.state {
            FlightState::Cruising { segment_timer, .. } => assert_eq!(segment_timer, 0.0),
            FlightState::Paused {
                remaining,
                duration,
                teleport,
            } => {
                assert_eq!(remaining, duration);
                assert_ne!(teleport, TeleportPlan::Done);
            }
        }
    }

    #[test]
    fn test_certain_pause_and_teleport_chances() {
        let (mut orb, mut config, mut rng) = orb(4);
        config.pause_chance = 1.0;
        config.teleport_chance = 1.0;
        orb.state = FlightState::Cruising {
            segment_timer: 0.0,
            segment_duration: 0.01,
        };
        orb.update(0.02, &config, &mut rng);
        assert!(matches!(
            orb.state,
            FlightState::Paused {
                teleport: TeleportPlan::Planned,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_pause_chance_always_rerolls() {
        let (mut orb, mut config, mut rng) = orb(5);
        config.pause_chance = 0.0;
        for _ in 0..2000 {
            orb.update(0.1, &config, &mut rng);
            assert!(!orb.state.is_paused());
        }
    }

    #[test]
    fn test_pause_brakes_toward_zero() {
        let (mut orb, config, mut rng) = orb(6);
        orb.angular_speed = 1.0;
        orb.state = FlightState::Paused {
            remaining: 10.0,
            duration: 10.0,
            teleport: TeleportPlan::None,
        };
        for _ in 0..120 {
            orb.update(1.0 / 60.0, &config, &mut rng);
        }
        assert!(orb.angular_speed < 0.1);
        assert!(orb.state.is_paused());
    }

    #[test]
    fn test_planned_teleport_fires_once_in_window() {
        let (mut orb, config, mut rng) = orb(7);
        orb.state = FlightState::Paused {
            remaining: 1.0,
            duration: 1.0,
            teleport: TeleportPlan::Planned,
        };

        // 0.5 remaining: still outside the 40% window.
        orb.update(0.5, &config, &mut rng);
        assert!(!orb.skip_trail_interpolation);
        assert!(matches!(
            orb.state,
            FlightState::Paused {
                teleport: TeleportPlan::Planned,
                ..
            }
        ));

        orb.update(0.2, &config, &mut rng);
        assert!(orb.skip_trail_interpolation);
        assert!(matches!(
            orb.state,
            FlightState::Paused {
                teleport: TeleportPlan::Done,
                ..
            }
        ));

        orb.skip_trail_interpolation = false;
        orb.update(0.1, &config, &mut rng);
        assert!(!orb.skip_trail_interpolation);
    }

    #[test]
    fn test_pause_expiry_resumes_cruise() {
        let (mut orb, config, mut rng) = orb(8);
        orb.state = FlightState::Paused {
            remaining: 0.05,
            duration: 1.0,
            teleport: TeleportPlan::None,
        };
        orb.update(0.1, &config, &mut rng);
        assert!(matches!(orb.state, FlightState::Cruising { .. }));
    }

    #[test]
    fn test_huge_dt_still_teleports_before_resuming() {
        let (mut orb, config, mut rng) = orb(9);
        orb.state = FlightState::Paused {
            remaining: 1.0,
            duration: 1.0,
            teleport: TeleportPlan::Planned,
        };
        orb.update(5.0, &config, &mut rng);
        assert!(orb.skip_trail_interpolation);
        assert!(matches!(orb.state, FlightState::Cruising { .. }));
    }

    #[test]
    fn test_teleport_relocates_within_bounds() {
        let (mut orb, config, mut rng) = orb(10);
        orb.teleport(&config, &mut rng);
        assert_eq!(orb.plane_normal, orb.target_plane_normal);
        assert!((orb.plane_normal.length() - 1.0).abs() < 1e-5);
        assert!((config.min_radius..=config.max_radius).contains(&orb.radius));
        assert!((config.min_height..=config.max_height).contains(&orb.height));
        assert!((0.0..TAU).contains(&orb.angle));
        assert!(orb.skip_trail_interpolation);
    }

    #[test]
    fn test_plane_normal_eases_and_stays_unit() {
        let (mut orb, config, mut rng) = orb(11);
        orb.plane_normal = Vec3::Y;
        orb.target_plane_normal = Vec3::X;
        orb.state = FlightState::Cruising {
            segment_timer: 0.0,
            segment_duration: 1000.0,
        };
        for _ in 0..600 {
            orb.update(1.0 / 60.0, &config, &mut rng);
            assert!((orb.plane_normal.length() - 1.0).abs() < 1e-4);
        }
        assert!(orb.plane_normal.distance(Vec3::X) < 0.05);
    }

    #[test]
    fn test_antipodal_plane_target_stays_finite() {
        let (mut orb, config, mut rng) = orb(15);
        orb.plane_normal = Vec3::Y;
        orb.target_plane_normal = Vec3::NEG_Y;
        // One huge step collapses the blend to zero length.
        orb.state = FlightState::Cruising {
            segment_timer: 0.0,
            segment_duration: 1000.0,
        };
        orb.update(1.0 / 1.2, &config, &mut rng);
        assert!(orb.plane_normal.is_finite());
        assert!((orb.plane_normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_render_values_clamped_at_extremes() {
        let (mut orb, config, mut rng) = orb(12);
        orb.radius = config.max_radius;
        orb.target_radius = config.max_radius;
        orb.height = config.min_height;
        orb.target_height = config.min_height;
        for _ in 0..300 {
            orb.update(1.0 / 60.0, &config, &mut rng);
            orb.radius = config.max_radius;
            orb.height = config.min_height;
            orb.refresh_render_values(&config);
            assert!(orb.render_radius() <= config.max_radius);
            assert!(orb.render_height() >= config.min_height);
        }
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let (mut orb, config, mut rng) = orb(13);
        let angle = orb.angle;
        orb.update(f32::NAN, &config, &mut rng);
        orb.update(-1.0, &config, &mut rng);
        assert_eq!(orb.angle, angle);
    }

    #[test]
    fn test_record_trail_consumes_skip_flag() {
        let (mut orb, config, mut rng) = orb(14);
        orb.record_trail(&config);
        orb.teleport(&config, &mut rng);
        orb.refresh_render_values(&config);
        assert_eq!(orb.record_trail(&config), TrailAppend::Break);
        assert!(!orb.skip_trail_interpolation);
        assert_eq!(orb.trail().points().len(), 2);
    }

    #[test]
    fn test_apply_config_shrinks_trail_and_reclamps() {
        let (mut orb, mut config, mut rng) = orb(16);
        for _ in 0..120 {
            orb.update(1.0 / 60.0, &config, &mut rng);
            orb.record_trail(&config);
        }
        let newest = orb.trail().points().last();
        assert!(orb.trail().points().len() > 10);

        config.trail_max = 10;
        config.min_radius = 2.4;
        config.max_radius = 2.5;
        orb.apply_config(&config);
        assert_eq!(orb.trail().points().len(), 10);
        assert_eq!(orb.trail().points().last(), newest);
        assert!((2.4..=2.5).contains(&orb.render_radius()));
        assert!(orb.trail().is_dirty());
    }
}
