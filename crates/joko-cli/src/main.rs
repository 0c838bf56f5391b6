//! Joko Command-Line Interface
//!
//! Steps through quantum circuits one column at a time and prints the state
//! vector before and after every column.
//!
//! ```text
//! $ joko run --preset bell
//! $ joko run --input circuit.json --seed 7 --format json
//! $ joko run --preset teleportation --shots 1000
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{gates, presets, run, version};
use config::CliConfig;

/// Joko - step-by-step quantum state-vector simulator
#[derive(Parser)]
#[command(name = "joko")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true, env = "JOKO_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a circuit and print every step
    Run {
        /// Circuit file (JSON)
        #[arg(short, long, conflicts_with = "preset", required_unless_present = "preset")]
        input: Option<String>,

        /// Built-in circuit (see `joko presets`)
        #[arg(short, long)]
        preset: Option<String>,

        /// Seed for measurement randomness
        #[arg(long)]
        seed: Option<u64>,

        /// Sample the final state this many times and print a histogram
        #[arg(short, long)]
        shots: Option<u32>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List the gate catalogue
    Gates,

    /// List built-in circuits
    Presets,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            input,
            preset,
            seed,
            shots,
            format,
        } => run::execute(
            &config,
            input.as_deref(),
            preset.as_deref(),
            seed,
            shots,
            &format,
        ),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Presets => {
            presets::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
