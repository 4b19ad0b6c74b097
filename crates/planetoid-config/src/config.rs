//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Orb simulation tuning.
    pub orbs: OrbConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Headless run settings.
    pub run: RunConfig,
}

/// Viewport configuration. Only the aspect ratio reaches the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting distance from the look-at target.
    pub radius: f32,
    /// Closest allowed zoom.
    pub min_radius: f32,
    /// Farthest allowed zoom.
    pub max_radius: f32,
    /// Starting horizontal angle in radians.
    pub theta: f32,
    /// Starting polar angle in radians.
    pub phi: f32,
    /// Radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// Radius units per second per wheel line scrolled in a frame.
    pub wheel_zoom_speed: f32,
    /// Radians per second while a rotate key is held.
    pub key_rotate_speed: f32,
    /// Radius units per second while a zoom key is held.
    pub key_zoom_speed: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

/// Orb simulation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Population created by `initialize` when nothing was requested earlier.
    pub initial_count: usize,
    /// Smallest allowed population.
    pub min_count: usize,
    /// Largest allowed population.
    pub max_count: usize,
    /// Inner bound of the rendered orbit radius.
    pub min_radius: f32,
    /// Outer bound of the rendered orbit radius.
    pub max_radius: f32,
    /// Lower bound of the rendered height offset.
    pub min_height: f32,
    /// Upper bound of the rendered height offset.
    pub max_height: f32,
    /// Cruise target angular speed range in rad/s.
    pub min_angular_speed: f32,
    /// Cruise target angular speed range in rad/s.
    pub max_angular_speed: f32,
    /// Cruise segment duration range in seconds.
    pub min_segment_secs: f32,
    /// Cruise segment duration range in seconds.
    pub max_segment_secs: f32,
    /// Pause duration range in seconds.
    pub min_pause_secs: f32,
    /// Pause duration range in seconds.
    pub max_pause_secs: f32,
    /// Chance that a finished segment becomes a pause.
    pub pause_chance: f64,
    /// Chance that a pause carries a teleport.
    pub teleport_chance: f64,
    /// Chance that a re-rolled segment flips direction.
    pub direction_flip_chance: f64,
    /// Chance that a re-rolled segment picks a new orbital plane.
    pub replane_chance: f64,
    /// Fraction of the population assigned as chasers.
    pub chaser_fraction: f32,
    /// Floor for a chaser's target angular speed in rad/s.
    pub chaser_min_speed: f32,
    /// Pairs closer than this are pushed apart.
    pub collision_distance: f32,
    /// Angle perturbation applied to each side of a collision, in radians.
    pub collision_nudge: f32,
    /// Trail ring-buffer capacity in points.
    pub trail_max: usize,
    /// Largest gap between consecutive interpolated trail points.
    pub trail_spacing: f32,
    /// Jumps longer than this are recorded as a break, not interpolated.
    pub trail_break_distance: f32,
    /// Seconds a retired trail takes to fade out.
    pub retired_fade_secs: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write the final frame snapshot as JSON to this path.
    pub snapshot_path: Option<PathBuf>,
}

/// Headless run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Number of simulated frames before exiting.
    pub frames: u64,
    /// Log a statistics line every this many frames (0 disables).
    pub stats_interval: u64,
    /// Pace frames against the wall clock instead of stepping as fast as possible.
    pub realtime: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Planetoid".to_string(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            min_radius: 3.0,
            max_radius: 20.0,
            theta: 0.6,
            phi: 1.1,
            drag_sensitivity: 0.005,
            wheel_zoom_speed: 36.0,
            key_rotate_speed: 1.5,
            key_zoom_speed: 6.0,
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            seed: None,
            initial_count: 6,
            min_count: 1,
            max_count: 20,
            min_radius: 1.6,
            max_radius: 3.2,
            min_height: -0.6,
            max_height: 0.6,
            min_angular_speed: 0.4,
            max_angular_speed: 1.2,
            min_segment_secs: 2.0,
            max_segment_secs: 6.0,
            min_pause_secs: 0.6,
            max_pause_secs: 2.0,
            pause_chance: 0.3,
            teleport_chance: 0.45,
            direction_flip_chance: 0.35,
            replane_chance: 0.6,
            chaser_fraction: 0.3,
            chaser_min_speed: 1.4,
            collision_distance: 0.22,
            collision_nudge: 0.05,
            trail_max: 160,
            trail_spacing: 0.04,
            trail_break_distance: 0.9,
            retired_fade_secs: 1.2,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            snapshot_path: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            stats_interval: 120,
            realtime: false,
        }
    }
}

// --- Validation ---

/// Swap `lo`/`hi` when inverted. Returns `true` if a repair happened.
fn order_range<T: PartialOrd>(lo: &mut T, hi: &mut T) -> bool {
    if *lo > *hi {
        std::mem::swap(lo, hi);
        true
    } else {
        false
    }
}

impl Config {
    /// Repair inconsistent values in place instead of rejecting them.
    ///
    /// Returns a human-readable note for every repair so the caller can log it.
    pub fn validate(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        let cam = &mut self.camera;
        if order_range(&mut cam.min_radius, &mut cam.max_radius) {
            notes.push("camera.min_radius > max_radius, swapped".to_string());
        }
        if cam.min_radius <= 0.0 {
            cam.min_radius = CameraConfig::default().min_radius.min(cam.max_radius);
            notes.push("camera.min_radius must be positive".to_string());
        }
        let clamped = cam.radius.clamp(cam.min_radius, cam.max_radius);
        if clamped != cam.radius {
            notes.push(format!("camera.radius {} clamped to {clamped}", cam.radius));
            cam.radius = clamped;
        }
        if cam.near <= 0.0 || cam.far <= cam.near {
            cam.near = CameraConfig::default().near;
            cam.far = cam.far.max(cam.near * 10.0);
            notes.push("camera near/far planes repaired".to_string());
        }

        let orbs = &mut self.orbs;
        if orbs.min_count == 0 {
            orbs.min_count = 1;
            notes.push("orbs.min_count raised to 1".to_string());
        }
        if orbs.max_count < orbs.min_count {
            orbs.max_count = orbs.min_count;
            notes.push("orbs.max_count raised to min_count".to_string());
        }
        let clamped = orbs.initial_count.clamp(orbs.min_count, orbs.max_count);
        if clamped != orbs.initial_count {
            notes.push(format!(
                "orbs.initial_count {} clamped to {clamped}",
                orbs.initial_count
            ));
            orbs.initial_count = clamped;
        }
        if order_range(&mut orbs.min_radius, &mut orbs.max_radius) {
            notes.push("orbs radius range inverted, swapped".to_string());
        }
        if order_range(&mut orbs.min_height, &mut orbs.max_height) {
            notes.push("orbs height range inverted, swapped".to_string());
        }
        if order_range(&mut orbs.min_angular_speed, &mut orbs.max_angular_speed) {
            notes.push("orbs angular speed range inverted, swapped".to_string());
        }
        if order_range(&mut orbs.min_segment_secs, &mut orbs.max_segment_secs) {
            notes.push("orbs segment range inverted, swapped".to_string());
        }
        if order_range(&mut orbs.min_pause_secs, &mut orbs.max_pause_secs) {
            notes.push("orbs pause range inverted, swapped".to_string());
        }
        if orbs.min_segment_secs <= 0.0 {
            orbs.min_segment_secs = 0.1;
            orbs.max_segment_secs = orbs.max_segment_secs.max(0.1);
            notes.push("orbs segment durations must be positive".to_string());
        }
        if orbs.min_pause_secs <= 0.0 {
            orbs.min_pause_secs = 0.1;
            orbs.max_pause_secs = orbs.max_pause_secs.max(0.1);
            notes.push("orbs pause durations must be positive".to_string());
        }
        for (name, p) in [
            ("pause_chance", &mut orbs.pause_chance),
            ("teleport_chance", &mut orbs.teleport_chance),
            ("direction_flip_chance", &mut orbs.direction_flip_chance),
            ("replane_chance", &mut orbs.replane_chance),
        ] {
            let clamped = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
            if clamped != *p {
                notes.push(format!("orbs.{name} {p} clamped to {clamped}"));
                *p = clamped;
            }
        }
        let clamped = orbs.chaser_fraction.clamp(0.0, 1.0);
        if clamped != orbs.chaser_fraction {
            notes.push(format!(
                "orbs.chaser_fraction {} clamped to {clamped}",
                orbs.chaser_fraction
            ));
            orbs.chaser_fraction = clamped;
        }
        if orbs.trail_max < 2 {
            orbs.trail_max = 2;
            notes.push("orbs.trail_max raised to 2".to_string());
        }
        if orbs.trail_spacing <= 0.0 {
            orbs.trail_spacing = OrbConfig::default().trail_spacing;
            notes.push("orbs.trail_spacing must be positive".to_string());
        }
        if orbs.trail_break_distance < orbs.trail_spacing {
            orbs.trail_break_distance = orbs.trail_spacing;
            notes.push("orbs.trail_break_distance raised to trail_spacing".to_string());
        }
        if orbs.retired_fade_secs <= 0.0 {
            orbs.retired_fade_secs = OrbConfig::default().retired_fade_secs;
            notes.push("orbs.retired_fade_secs must be positive".to_string());
        }

        if self.window.width == 0 || self.window.height == 0 {
            self.window.width = self.window.width.max(1);
            self.window.height = self.window.height.max(1);
            notes.push("window size must be non-zero".to_string());
        }

        for note in &notes {
            log::warn!("config repaired: {note}");
        }
        notes
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
