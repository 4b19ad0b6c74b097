//! Configuration for the planetoid simulation.
//!
//! Settings persist to disk as RON files, accept CLI overrides via clap, and are
//! repaired (clamped, never rejected) by [`Config::validate`] before use.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, OrbConfig, RunConfig, WindowConfig};
pub use error::ConfigError;
