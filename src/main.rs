mod args;
mod commands;

use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;

use deskpaper::{
	backend, data_loaders::config::DeskConfig, debug, error, info, logging, paths, warn, Desktop,
};

use crate::args::Cli;

pub const DEBUG_NAME: &str = "DESKPAPER";

fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init(cli.debug, "warn");

	let config = load_config(&cli);

	std::panic::set_hook(Box::new(|panic_info| {
		error!("[{}] Panic: {}", DEBUG_NAME, panic_info);
	}));

	match real_main(&cli, &config) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn load_config(cli: &Cli) -> DeskConfig {
	let config_path = cli.config.clone().unwrap_or_else(paths::config_path);
	let config = DeskConfig::load(&config_path).unwrap_or_default();

	logging::set_debug(cli.debug || config.debug);
	logging::set_level(&config.log_level);
	if let Some(log_file) = config.log_file() {
		if let Err(e) = logging::set_log_file(&log_file) {
			warn!("[{}] Could not open log file {}: {}", DEBUG_NAME, log_file.display(), e);
		}
	}

	debug!("[{}] Config loaded from {}", DEBUG_NAME, config_path.display());
	config
}

fn real_main(cli: &Cli, config: &DeskConfig) -> Result<()> {
	let desktop = Desktop::new(backend::native().context("Could not get desktop info")?);
	info!("[{}] Desktop backend ready", DEBUG_NAME);

	let stdout = io::stdout();
	commands::run(cli, config, &desktop, &mut stdout.lock())
}
