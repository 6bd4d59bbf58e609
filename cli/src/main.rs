mod cli;
mod commands;
mod config;
mod data;
mod logging;
mod ui;

use clap::Parser;
use color_eyre::eyre::Result;

use cli::{Cli, Commands};
use config::{config_path, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let config = UserConfig::load_from(&config_file);
    let log_level_override = cli.verbose.then_some(LogLevel::Debug);

    let log_mode = match cli.command {
        Commands::Pre { .. } | Commands::Post { .. } => LogMode::Both,
        _ => LogMode::Stderr,
    };
    let _guard = logging::init(config.log_level, log_mode, log_level_override);

    match cli.command {
        Commands::Pre { sleep_action } => commands::hook::run_pre(&config, sleep_action),
        Commands::Post { sleep_action } => commands::hook::run_post(&config, sleep_action),
        Commands::Plot { filter } => commands::plot::run(&config, filter.into()),
        Commands::List { filter, json } => commands::list::run(&config, filter.into(), json),
        Commands::Debug => commands::debug::run(&config, &config_file),
        Commands::Config { path, reset } => commands::config::run(&config_file, path, reset),
    }
}
