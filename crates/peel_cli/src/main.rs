//! Peel CLI
//!
//! Runs the peel controller and list surface without a window, printing the
//! transitions and layer geometry they produce.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use peel_core::Point;
use peel_widgets::prelude::Config;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peel")]
#[command(about = "Peel-to-delete card list, headless")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a drag gesture to one card and print the resulting layers
    Simulate {
        /// Card width
        #[arg(long, default_value = "300")]
        width: f32,

        /// Card height
        #[arg(long, default_value = "130")]
        height: f32,

        /// Horizontal drag translations, in order
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            default_value = "-50,-150,-310"
        )]
        samples: Vec<f32>,

        /// Tap the card at x,y after the gesture settles
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        tap: Option<Point>,

        /// Pin an expanded card at this progress instead of a random one
        #[arg(long, conflicts_with = "seed")]
        pin: Option<f32>,

        /// Seed for the random pin
        #[arg(long)]
        seed: Option<u64>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Populate a list, peel and delete one card, and let it collapse
    Demo {
        /// Number of cards
        #[arg(long, default_value = "8")]
        cards: usize,

        /// Zero-based position of the card to delete
        #[arg(long, default_value = "2")]
        delete: usize,

        /// Seed for the random pin
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{value}'"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("invalid x: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("invalid y: {e}"))?;
    Ok(Point::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            width,
            height,
            samples,
            tap,
            pin,
            seed,
            json,
        } => commands::simulate(
            &config,
            commands::Gesture {
                width,
                height,
                samples,
                tap,
            },
            commands::pin_source(pin, seed),
            json,
        ),
        Commands::Demo {
            cards,
            delete,
            seed,
        } => commands::demo(&config, cards, delete, commands::pin_source(None, seed)),
        Commands::Config => {
            print!("{}", config.to_toml().context("Failed to render config")?);
            Ok(())
        }
    }
}
