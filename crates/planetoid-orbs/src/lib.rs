//! Orbiting-orb simulation: flight controller, chasers, collisions, trails,
//! population management, and the [`SimulationState`] that ties them together.

pub mod chaser;
pub mod collision;
pub mod orb;
pub mod population;
pub mod retired;
pub mod simulation;
pub mod snapshot;
pub mod trail;

pub use chaser::{assign_chasers, pick_target, steer_chasers};
pub use collision::resolve_collisions;
pub use orb::{FlightState, OrbEntity, OrbId, OrbRole, TeleportPlan};
pub use population::Population;
pub use retired::{RetiredTrail, RetiredTrails};
pub use simulation::{OrbSummary, SimulationState, SimulationStats, TickReport};
pub use snapshot::{CameraSnapshot, FrameSnapshot, OrbSnapshot, RetiredSnapshot};
pub use trail::{Trail, TrailAppend, TrailBuffer};

pub use planetoid_camera::{CameraState, CameraStateUpdate};
