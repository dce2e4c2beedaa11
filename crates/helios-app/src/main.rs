//! The `helios` binary: loads configuration, sets up logging, and runs the
//! orrery against the headless renderer.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use helios_animation::SystemClock;
use helios_app::{FrameHost, HeadlessRenderer, Orrery, PlatformDirs, PlatformError};
use helios_assets::FsAssetSource;
use helios_config::{CliArgs, Config, ConfigError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("helios: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), StartupError> {
    let dirs = PlatformDirs::resolve_and_create()?;
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let mut config = Config::load_or_default(&config_dir)?;
    config.apply_cli_overrides(args);
    helios_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if args.write_config {
        config.save(&config_dir)?;
    }

    info!(
        title = %config.window.title,
        width = config.window.width,
        height = config.window.height,
        assets = %config.assets.root.display(),
        "Helios starting"
    );

    let mut orrery = Orrery::new(
        &config,
        Arc::new(FsAssetSource::new(config.assets.root.clone())),
        HeadlessRenderer::new(config.debug.stats_interval),
        SystemClock::new(),
    );
    orrery.apply_edits(&args.set);

    let mut host = FrameHost::new();
    let frame = host.register(|orrery: &mut Orrery<HeadlessRenderer>, dt| orrery.frame(dt));
    let pacing = Duration::from_secs_f64(1.0 / f64::from(config.window.target_fps.max(1)));

    while args.frames.is_none_or(|limit| host.frame_count() < limit) {
        host.run_frame(&mut orrery);
        std::thread::sleep(pacing);
    }

    host.deregister(frame);
    orrery.teardown();
    orrery.backend().log_summary();
    Ok(())
}
