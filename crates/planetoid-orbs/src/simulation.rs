//! The simulation owner.
//!
//! [`SimulationState`] holds the camera, the live population, the fading
//! retired trails, the input state, and the RNG. One [`tick`](SimulationState::tick)
//! per rendered frame advances everything in a fixed order:
//!
//! 1. camera, from the input accumulated since the last tick
//! 2. every orb's flight controller, in population order
//! 3. chaser steering
//! 4. collisions
//! 5. trail recording
//! 6. retired trail fade
//!
//! Given the same seed and the same sequence of calls, two simulations produce
//! identical frames.

use glam::Vec3;
use planetoid_camera::{CameraState, CameraStateUpdate, OrbitCamera, update_orbit_camera};
use planetoid_config::{Config, OrbConfig};
use planetoid_input::{KeyboardState, MouseState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::chaser::{pick_target, steer_chasers};
use crate::collision::resolve_collisions;
use crate::orb::{OrbEntity, OrbId, OrbRole};
use crate::population::Population;
use crate::retired::{RetiredTrail, RetiredTrails};
use crate::snapshot::{CameraSnapshot, FrameSnapshot};
use crate::trail::TrailAppend;

/// Entry in the entity selection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbSummary {
    pub id: OrbId,
    pub display_name: String,
    pub is_chaser: bool,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chasers that steered toward a live target.
    pub steered: usize,
    /// Overlapping pairs resolved.
    pub collisions: usize,
    /// Trail appends recorded as discontinuities.
    pub trail_breaks: usize,
    /// Retired trails that finished fading.
    pub retired_discarded: usize,
}

/// Running totals since the simulation started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    pub frames: u64,
    pub elapsed: f64,
    pub population: usize,
    pub chasers: usize,
    pub retired: usize,
    pub collisions: u64,
    pub trail_breaks: u64,
}

/// Complete simulation state. Generic over the RNG so tests and tools can
/// inject their own source; defaults to a seeded ChaCha8.
#[derive(Debug)]
pub struct SimulationState<R = ChaCha8Rng> {
    config: OrbConfig,
    population: Population,
    retired: RetiredTrails,
    camera: OrbitCamera,
    mouse: MouseState,
    keyboard: KeyboardState,
    rng: R,
    seed: Option<u64>,
    elapsed: f64,
    frame: u64,
    collisions_total: u64,
    trail_breaks_total: u64,
}

impl SimulationState<ChaCha8Rng> {
    /// Create a simulation seeded from `config.orbs.seed`, or from OS entropy
    /// when no seed is configured. The seed in use is logged.
    pub fn new(config: &Config) -> Self {
        let seed = config.orbs.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "simulation seeded");
        let mut sim = Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed));
        sim.seed = Some(seed);
        sim
    }
}

impl<R: Rng> SimulationState<R> {
    /// Create a simulation drawing from `rng`. Orbs are spawned lazily on the
    /// first tick or by [`initialize`](Self::initialize).
    pub fn with_rng(config: &Config, rng: R) -> Self {
        let mut camera = OrbitCamera::from_config(&config.camera);
        camera.set_aspect_ratio(config.window.width as f32, config.window.height as f32);
        camera.update_matrices();
        Self {
            config: config.orbs.clone(),
            population: Population::new(),
            retired: RetiredTrails::new(),
            camera,
            mouse: MouseState::new(),
            keyboard: KeyboardState::new(),
            rng,
            seed: None,
            elapsed: 0.0,
            frame: 0,
            collisions_total: 0,
            trail_breaks_total: 0,
        }
    }

    /// Spawn the initial population. Idempotent.
    pub fn initialize(&mut self) {
        self.population.initialize(&self.config, &mut self.rng);
    }

    /// Whether the population has been spawned.
    pub fn is_initialized(&self) -> bool {
        self.population.is_initialized()
    }

    /// Advance the simulation by `dt` seconds. Negative or non-finite deltas
    /// are treated as zero.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if !self.population.is_initialized() {
            self.initialize();
        }

        update_orbit_camera(&mut self.camera, &self.mouse, &self.keyboard, dt);
        self.mouse.clear_transients();
        self.keyboard.clear_transients();

        let orbs = self.population.orbs_mut();
        for orb in orbs.iter_mut() {
            orb.update(dt, &self.config, &mut self.rng);
        }
        let steered = steer_chasers(orbs, self.config.chaser_min_speed);
        let collisions = resolve_collisions(orbs, &self.config);
        let trail_breaks = orbs
            .iter_mut()
            .map(|orb| orb.record_trail(&self.config))
            .filter(|append| *append == TrailAppend::Break)
            .count();
        let retired_discarded = self.retired.update(dt);

        self.elapsed += f64::from(dt);
        self.frame += 1;
        self.collisions_total += collisions as u64;
        self.trail_breaks_total += trail_breaks as u64;

        TickReport {
            steered,
            collisions,
            trail_breaks,
            retired_discarded,
        }
    }

    /// Current camera angles and distance.
    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    /// Overwrite any subset of the camera state; values are clamped.
    pub fn set_camera_state(&mut self, update: CameraStateUpdate) {
        self.camera.set_state(update);
        self.camera.update_matrices();
    }

    /// Live orb count. Before initialisation, the count the first tick will
    /// spawn: the last request, or the configured initial count.
    pub fn population_count(&self) -> usize {
        if self.population.is_initialized() {
            self.population.count()
        } else {
            self.population.planned_count(&self.config)
        }
    }

    /// Request a population size. Clamped to the configured bounds; recorded
    /// for later if the simulation has not been initialised yet.
    pub fn set_population_count(&mut self, n: usize) -> usize {
        self.population
            .set_target_count(n, &self.config, &mut self.retired, &mut self.rng)
    }

    /// Id, name, and role of every live orb, in population order.
    pub fn list_entities(&self) -> Vec<OrbSummary> {
        self.population
            .orbs()
            .iter()
            .map(|o| OrbSummary {
                id: o.id(),
                display_name: o.display_name(),
                is_chaser: o.is_chaser(),
            })
            .collect()
    }

    /// Turn chasing on or off for `id`. Enabling an orb that is not already a
    /// chaser gives it a random target. Unknown ids are ignored.
    pub fn set_chaser(&mut self, id: OrbId, enabled: bool) {
        let Some(index) = self.population.index_of(id) else {
            tracing::debug!(orb = %id, "set_chaser on unknown orb ignored");
            return;
        };
        let orbs = self.population.orbs_mut();
        if !enabled {
            orbs[index].role = OrbRole::Wanderer;
        } else if !orbs[index].is_chaser() {
            let target = pick_target(orbs, index, &mut self.rng);
            orbs[index].role = OrbRole::Chaser { target };
            tracing::debug!(orb = %id, ?target, "chaser enabled");
        }
    }

    /// World position of `id`, if it is alive.
    pub fn current_position(&self, id: OrbId) -> Option<Vec3> {
        self.population.get(id).map(OrbEntity::position)
    }

    /// Camera eye position.
    pub fn camera_position(&self) -> Vec3 {
        self.camera.eye_position()
    }

    /// Pointer state; feed winit events here between ticks.
    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    /// Keyboard state; feed winit events here between ticks.
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    /// Viewport size in pixels, used for the projection aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
        self.camera.update_matrices();
    }

    pub fn orbs(&self) -> &[OrbEntity] {
        self.population.orbs()
    }

    pub fn retired_trails(&self) -> &[RetiredTrail] {
        self.retired.as_slice()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Orb tuning in effect.
    pub fn config(&self) -> &OrbConfig {
        &self.config
    }

    /// Seed the RNG was created from, when known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clear every trail dirty flag once the renderer has rebuilt its geometry.
    pub fn mark_trails_clean(&mut self) {
        for orb in self.population.orbs_mut() {
            orb.trail_mut().mark_clean();
        }
        self.retired.mark_clean();
    }

    /// Apply a reloaded configuration.
    ///
    /// The camera keeps its angles and distance (re-clamped to the new bounds)
    /// and the population is re-clamped to the new count bounds. Every live
    /// trail is cut to the new `trail_max` and render values are re-clamped.
    pub fn reconfigure(&mut self, config: &Config) {
        let state = self.camera.state();
        let aspect = self.camera.aspect_ratio();
        self.camera = OrbitCamera::from_config(&config.camera);
        self.camera.set_aspect_ratio(aspect, 1.0);
        self.camera.set_state(CameraStateUpdate {
            theta: Some(state.theta),
            phi: Some(state.phi),
            radius: Some(state.radius),
        });
        self.camera.update_matrices();

        self.config = config.orbs.clone();
        for orb in self.population.orbs_mut() {
            orb.apply_config(&self.config);
        }
        if self.population.is_initialized() {
            let count = self.population.count();
            self.set_population_count(count);
        }
        tracing::info!("simulation reconfigured");
    }

    /// Running totals.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            frames: self.frame,
            elapsed: self.elapsed,
            population: self.population.count(),
            chasers: self.population.orbs().iter().filter(|o| o.is_chaser()).count(),
            retired: self.retired.len(),
            collisions: self.collisions_total,
            trail_breaks: self.trail_breaks_total,
        }
    }

    /// Serializable view of the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            frame: self.frame,
            elapsed: self.elapsed,
            camera: CameraSnapshot {
                state: self.camera.state(),
                eye: self.camera.eye_position(),
                aspect_ratio: self.camera.aspect_ratio(),
            },
            orbs: self.population.orbs().iter().map(Into::into).collect(),
            retired: self.retired.as_slice().iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
