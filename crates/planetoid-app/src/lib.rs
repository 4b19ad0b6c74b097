//! Headless driver for the planetoid simulation: platform directories, the
//! fixed-timestep loop, and the frame runner.

pub mod error;
pub mod game_loop;
pub mod platform;
pub mod runner;

pub use error::AppError;
pub use game_loop::{FIXED_DT, GameLoop, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use runner::{ConfigWatch, RunSummary, run, write_snapshot};
