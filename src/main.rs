//! Book-or - Entry Point
//!
//! `run` drives a session in the terminal; `schedule` prints the trial plan
//! for a seed as JSON without touching the network.

use book_or::assets::{manifest, preload_in_background};
use book_or::catalog::{load_catalog, Catalog};
use book_or::core::config::ExperimentConfig;
use book_or::core::error::Result;
use book_or::experiment::{plan_session, Experiment};
use book_or::submit::{HttpTransport, Submitter};
use book_or::surface::HeadlessSurface;
use book_or::tui;

use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Picture-book and/or experiment
#[derive(Parser, Debug)]
#[command(name = "book-or")]
#[command(about = "Run the picture-book conjunction experiment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a session in the terminal
    Run {
        /// TOML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Prefill the subject ID field
        #[arg(long)]
        subject: Option<String>,

        /// Random seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the trial schedule for a seed as JSON
    Schedule {
        /// TOML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Random seed (drawn at random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<ExperimentConfig> {
    let mut config = match path {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn load_items(config: &ExperimentConfig) -> Result<Catalog> {
    match &config.catalog {
        Some(path) => load_catalog(path),
        None => Ok(Catalog::builtin()),
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(log_file: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("book_or=info"));
    let file = File::create(log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, subject, seed } => {
            let config = load_config(config.as_deref(), seed)?;
            init_logging(&config.log_file)?;
            tracing::info!("Book-or starting...");

            let catalog = load_items(&config)?;
            let preload = preload_in_background(manifest(&config.image_dir, &catalog));

            let transport = Arc::new(HttpTransport::from_config(&config.submit));
            let drain_timeout = config.submit.drain_timeout();
            let mut experiment =
                Experiment::new(config, catalog, HeadlessSurface::new(), Submitter::new(transport))?;

            let outcome = tui::run(&mut experiment, preload, subject).await;

            let abandoned = experiment.submitter_mut().drain(drain_timeout).await;
            tracing::info!(
                phase = experiment.phase().name(),
                abandoned,
                "Book-or shutting down"
            );
            outcome
        }
        Command::Schedule { config, seed } => {
            let config = load_config(config.as_deref(), seed)?;
            let catalog = load_items(&config)?;
            let plan = plan_session(&config, catalog)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
            Ok(())
        }
    }
}
