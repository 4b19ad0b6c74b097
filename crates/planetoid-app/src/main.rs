//! `planetoid`: run the orb simulation headless and optionally dump the final
//! frame as JSON.

use std::process::ExitCode;

use clap::Parser;
use planetoid_app::{AppError, ConfigWatch, PlatformDirs, run, write_snapshot};
use planetoid_config::{CliArgs, Config};
use planetoid_orbs::SimulationState;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match try_main(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "planetoid failed");
            eprintln!("planetoid: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let on_disk = Config::load_or_create(&dirs.config_dir)?;
    let mut config = on_disk.clone();
    config.apply_cli_overrides(args);

    planetoid_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    let repairs = config.validate();
    info!(
        config_dir = %dirs.config_dir.display(),
        repairs = repairs.len(),
        "planetoid starting"
    );

    let mut sim = SimulationState::new(&config);
    let watch = ConfigWatch::new(dirs.config_dir.clone(), on_disk);
    let summary = run(&mut sim, &config.run, Some(watch));
    info!(
        population = summary.stats.population,
        retired = summary.stats.retired,
        reloads = summary.reloads,
        "simulation complete"
    );

    if let Some(path) = &config.debug.snapshot_path {
        let path = if path.is_relative() {
            dirs.data_dir.join(path)
        } else {
            path.clone()
        };
        write_snapshot(&path, &sim.snapshot())?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}
