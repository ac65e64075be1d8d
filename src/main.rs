use clap::{Parser, Subcommand};
use medsched_core::{DocumentStore, FileStore};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;

use commands::{ConfigCommand, DayCommand, MedCommand, Schedule, StageCommand, TakeCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "meds")]
#[command(version)]
#[command(about = "Track a daily medication schedule", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the schedule for a day
    Day(DayCommand),

    /// Mark a dose as taken (or not taken)
    Take(TakeCommand),

    /// Manage medications
    Med(MedCommand),

    /// Manage intake stages
    Stage(StageCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    init_tracing(&config);
    tracing::debug!(
        "Data directory: {} ({})",
        config.data_dir.value.display(),
        config.data_dir.source
    );

    let schedule: Schedule = DocumentStore::new(FileStore::new(config.data_dir.value.clone()));

    match cli.command {
        Some(Commands::Day(cmd)) => cmd.run(&schedule)?,
        Some(Commands::Take(cmd)) => cmd.run(&schedule)?,
        Some(Commands::Med(cmd)) => cmd.run(&schedule)?,
        Some(Commands::Stage(cmd)) => cmd.run(&schedule)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Logs go to stderr so command output stays clean.
fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter.value)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
