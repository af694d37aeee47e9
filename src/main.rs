mod app;
mod cli;
mod config;
mod output;
mod utils;

use chrono::Utc;
use clap::Parser;

use app::{CommandContext, handle_command, load_catalog};
use cli::Cli;
use config::Config;
use listenstats::error::AppError;
use utils::{Timezone, parse_instant};

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let now = match cli.now.as_deref() {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    let timezone = Timezone::parse(cli.timezone.as_deref())?;
    let labels = config.labels.to_labels();
    let catalog = load_catalog(cli.snapshot.as_deref())?;

    let ctx = CommandContext {
        cli,
        catalog: &catalog,
        now,
        timezone,
        labels: &labels,
    };
    handle_command(&ctx)
}

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);
    init_logging(cli.debug);

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
