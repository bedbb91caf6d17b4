//! ringtimer - a countdown timer with a progress ring for the terminal.

use anyhow::{Context, Result};
use bubbletea_rs::Program;
use clap::Parser;
use std::fs::File;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ringtimer::app::{install_settings, App};
use ringtimer::config::{Cli, Settings};

fn init_logging(cli: &Cli) -> Result<()> {
    // The terminal belongs to the timer, so logs only go to an explicit file.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ringtimer={}", cli.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = Settings::load(&cli).context("Invalid settings")?;
    info!(
        "Starting ringtimer: {} min, {} theme, bell {}",
        settings.minutes,
        settings.theme,
        if settings.bell { "on" } else { "off" }
    );
    install_settings(settings);

    let program = Program::<App>::builder()
        .alt_screen(true)
        .signal_handler(true)
        .build()
        .context("Failed to set up the terminal")?;
    program.run().await.context("Timer exited with an error")?;

    info!("ringtimer exited");
    Ok(())
}
