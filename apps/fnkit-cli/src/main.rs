//! `fnkit` command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # Full walkthrough (default command)
//! fnkit
//!
//! # Two accumulators seeded at 100, three calls each
//! fnkit accumulate --initial 100 --times 3 --instances 2
//!
//! # Dispatch by name, or through the higher-order applier
//! fnkit dispatch add 5 3
//! fnkit apply subtract 10 2
//!
//! # Saturating accumulators with custom constants
//! fnkit --overflow saturate --k1 1 --k2 2 accumulate
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fnkit::{FnkitConfig, OverflowPolicy};

use crate::commands::App;

/// fnkit - stateful accumulators and a named operation registry
#[derive(Parser)]
#[command(name = "fnkit")]
#[command(about = "fnkit - stateful accumulators and a named operation registry")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `accumulator.k1`
    #[arg(long, allow_negative_numbers = true)]
    k1: Option<i64>,

    /// Override `accumulator.k2`
    #[arg(long, allow_negative_numbers = true)]
    k2: Option<i64>,

    /// Override `accumulator.overflow`
    #[arg(long, value_enum)]
    overflow: Option<OverflowArg>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OverflowArg {
    Wrap,
    Saturate,
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::Wrap => Self::Wrap,
            OverflowArg::Saturate => Self::Saturate,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through every building block (default)
    Tour,
    /// Create accumulators and invoke them repeatedly
    Accumulate {
        /// Initial state of every accumulator
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        initial: i64,
        /// Invocations per accumulator
        #[arg(long, default_value_t = 2)]
        times: usize,
        /// Number of independent accumulators
        #[arg(long, default_value_t = 2)]
        instances: usize,
    },
    /// Invoke a registered operation by name
    Dispatch {
        name: String,
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Look up an operation and pass it to the higher-order applier
    Apply {
        name: String,
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Build a multiplier closure and apply it
    Multiply {
        #[arg(long, allow_negative_numbers = true)]
        factor: i64,
        #[arg(allow_negative_numbers = true)]
        x: i64,
    },
    /// Deliver a payload through a callback
    Fetch {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List registered operation names
    List,
    /// Validate configuration and exit
    Check,
}

fn apply_cli_overrides(config: &mut FnkitConfig, cli: &Cli) {
    if let Some(k1) = cli.k1 {
        config.accumulator.k1 = k1;
    }
    if let Some(k2) = cli.k2 {
        config.accumulator.k2 = k2;
    }
    if let Some(overflow) = cli.overflow {
        config.accumulator.overflow = overflow.into();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (FNKIT__*) -> 4) CLI overrides
    let mut config =
        FnkitConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);

    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!(config = ?cli.config, "configuration loaded");

    if cli.print_config {
        println!("Effective configuration:\n{}", commands::render_yaml(&config)?);
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Dispatch subcommands (default: tour)
    match cli.command.unwrap_or(Commands::Tour) {
        Commands::Tour => commands::tour(&App::from_config(&config), &mut out)?,
        Commands::Accumulate {
            initial,
            times,
            instances,
        } => App::from_config(&config).accumulate(&mut out, initial, times, instances)?,
        Commands::Dispatch { name, a, b } => {
            App::from_config(&config).dispatch(&mut out, &name, a, b)?;
        }
        Commands::Apply { name, a, b } => App::from_config(&config).apply(&mut out, &name, a, b)?,
        Commands::Multiply { factor, x } => commands::multiply_by(&mut out, factor, x)?,
        Commands::Fetch { id } => commands::fetch(&mut out, id)?,
        Commands::List => App::from_config(&config).list(&mut out)?,
        Commands::Check => {
            writeln!(out, "Configuration is valid")?;
            writeln!(out, "{}", commands::render_yaml(&config)?)?;
        }
    }

    out.flush()?;
    Ok(())
}
