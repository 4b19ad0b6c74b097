//! Drives a [`SimulationState`] for a fixed number of frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use planetoid_config::{Config, RunConfig};
use planetoid_orbs::{FrameSnapshot, SimulationState, SimulationStats};
use tracing::{info, warn};

use crate::error::AppError;
use crate::game_loop::{FIXED_DT, GameLoop};

/// Polls `config.ron` for edits made while the simulation runs.
#[derive(Debug)]
pub struct ConfigWatch {
    dir: PathBuf,
    on_disk: Config,
}

impl ConfigWatch {
    /// Watch `dir`, treating `on_disk` as the file's current contents.
    pub fn new(dir: PathBuf, on_disk: Config) -> Self {
        Self { dir, on_disk }
    }

    /// Return the repaired new config if the file changed since the last poll.
    /// Read or parse failures are logged and leave the running config alone.
    pub fn poll(&mut self) -> Option<Config> {
        match self.on_disk.reload(&self.dir) {
            Ok(Some(new)) => {
                self.on_disk = new.clone();
                let mut repaired = new;
                repaired.validate();
                Some(repaired)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "config reload failed");
                None
            }
        }
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub stats: SimulationStats,
    /// Config reloads applied during the run.
    pub reloads: u32,
}

/// Step `sim` for `settings.frames` fixed ticks.
///
/// Every `settings.stats_interval` ticks a statistics line is logged and, when a
/// watch is given, `config.ron` is checked for changes. After each presented
/// frame the trail dirty flags are cleared, standing in for a renderer.
pub fn run(
    sim: &mut SimulationState,
    settings: &RunConfig,
    mut watch: Option<ConfigWatch>,
) -> RunSummary {
    let mut game_loop = GameLoop::new();
    let mut done = 0u64;
    let mut reported = 0u64;
    let mut reloads = 0;

    info!(frames = settings.frames, realtime = settings.realtime, "run started");
    while done < settings.frames {
        let mut step = |dt: f64, _sim_time: f64| {
            if done < settings.frames {
                sim.tick(dt as f32);
                done += 1;
            }
        };
        if settings.realtime {
            game_loop.tick(step, |_alpha| {});
            std::thread::sleep(Duration::from_secs_f64(FIXED_DT));
        } else {
            game_loop.advance(FIXED_DT, &mut step);
        }
        sim.mark_trails_clean();

        if settings.stats_interval > 0 && done / settings.stats_interval > reported {
            reported = done / settings.stats_interval;
            log_stats(&sim.stats());
            if let Some(new) = watch.as_mut().and_then(ConfigWatch::poll) {
                sim.reconfigure(&new);
                reloads += 1;
            }
        }
    }

    let stats = sim.stats();
    info!(
        frames = stats.frames,
        collisions = stats.collisions,
        trail_breaks = stats.trail_breaks,
        "run finished"
    );
    RunSummary { stats, reloads }
}

fn log_stats(stats: &SimulationStats) {
    info!(
        frame = stats.frames,
        elapsed = stats.elapsed,
        population = stats.population,
        chasers = stats.chasers,
        retired = stats.retired,
        collisions = stats.collisions,
        "stats"
    );
}

/// Write `snapshot` as pretty JSON, creating parent directories as needed.
pub fn write_snapshot(path: &Path, snapshot: &FrameSnapshot) -> Result<(), AppError> {
    let io_err = |source| AppError::SnapshotIo {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
