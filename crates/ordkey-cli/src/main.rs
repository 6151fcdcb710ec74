//! ordkey CLI
//!
//! Runs rounds of the two-party posting-order protocol and reports whether
//! both participants derived the same secret.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    common::{self, ConfigOverrides},
    run::{self, RunArgs},
};

#[derive(Parser)]
#[command(name = "ordkey")]
#[command(about = "ordkey - shared secrets from anonymous posting order", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional; defaults apply when missing)
    #[arg(short, long, global = true, default_value = "ordkey.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one protocol round and compare the two secrets
    Run(RunArgs),

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `run --json` output stays machine-readable.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => {
            let config = common::load_config(&cli.config, &args.overrides)?;
            run::runtime(config.simulated)?.block_on(run::run(&config, &args))?;
        }

        Commands::Config { overrides } => {
            let config = common::load_config(&cli.config, &overrides)?;
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}
