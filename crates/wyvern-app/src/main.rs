//! The binary entry point.

use clap::Parser;
use wyvern_app::platform::PlatformDirs;
use wyvern_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve_and_create() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            std::process::exit(1);
        }
    };

    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    wyvern_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = wyvern_app::window::run(config) {
        tracing::error!("Event loop terminated with error: {e}");
        std::process::exit(1);
    }
}
