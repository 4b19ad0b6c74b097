//! Fixed-timestep frame driver.
//!
//! The simulation always advances in `FIXED_DT` steps. Frame time is fed into
//! an accumulator and drained one step at a time; the leftover fraction is the
//! interpolation alpha for whatever presents the frame.

use std::time::Instant;

use tracing::warn;

/// Simulation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame times above this are clamped so a stall costs slowdown, not a burst
/// of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state for the fixed-timestep loop.
#[derive(Debug)]
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure the wall-clock time since the previous call, run the fixed
    /// steps it covers, then present once with the interpolation alpha.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64), mut render_fn: impl FnMut(f64)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        let alpha = self.advance(frame_time, update_fn);
        render_fn(alpha);
    }

    /// Feed an explicit frame time. `update_fn(dt, sim_time)` runs once per
    /// whole step covered. Returns the interpolation alpha in `[0, 1)`.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = if frame_time.is_finite() { frame_time.max(0.0) } else { 0.0 };
        if frame_time > MAX_FRAME_TIME {
            warn!(
                frame_ms = frame_time * 1000.0,
                max_ms = MAX_FRAME_TIME * 1000.0,
                "frame time clamped"
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }
        self.frame_count += 1;
        self.alpha()
    }

    /// Interpolation alpha from the current accumulator.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Frames presented.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
