//! Cutplay CLI - PCM Clip Editor
//!
//! Command-line interface for the Cutplay editing engine.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use cutplay::cli::{commands, Cli};
use cutplay::EditorConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Cutplay v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Some(command) => commands::run(command, &config).map_err(|err| {
            error!("{} [{}]", err, err.error_code());
            for hint in err.recovery_suggestions() {
                error!("  hint: {}", hint);
            }
            anyhow::Error::new(err)
        }),
        None => {
            println!("Cutplay v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}
