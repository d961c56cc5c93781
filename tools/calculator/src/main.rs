//! Calculator - console front-end for calc-engine
//!
//! Without a subcommand an interactive numbered menu starts. With one, a
//! single operation is evaluated and printed.

mod commands;
mod config;
mod input;
mod menu;

use crate::commands::{Command, OutputOptions};
use crate::config::CalculatorConfig;
use crate::menu::MenuSession;
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use rustyline::DefaultEditor;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calculator")]
#[command(about = "Advanced calculator with memory and history")]
#[command(long_about = "Advanced calculator with memory and history

Run without a command for the interactive menu, or evaluate one operation:
  calculator add 2 3            # 5
  calculator divide 1 3         # 0.333333
  calculator log 8 --base 2     # 3
  calculator factorial 5        # 120
  calculator --json sqrt 16     # JSON result with engine snapshot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CalculatorConfig::load(cli.config.as_deref())?;

    // Configure colored output
    let color = config.display.color && !cli.no_color;
    if !color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose, &config.log.level);
    debug!(?config, "configuration loaded");

    match cli.command {
        Some(command) => {
            let options = OutputOptions {
                json: cli.json,
                digits: config.display.significant_digits,
            };
            let ok = commands::run(
                command.operation(),
                options,
                &mut io::stdout(),
                &mut io::stderr(),
            )?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        },
        None => run_interactive(&config, color),
    }
}

/// Log to stderr; `RUST_LOG` wins over the configured level
fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_interactive(config: &CalculatorConfig, color: bool) -> Result<()> {
    let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;

    println!("{}", "Advanced Calculator".bright_cyan().bold());
    println!(
        "Choose an operation by number, {} to exit\n",
        "Ctrl+D".bright_yellow()
    );

    let mut session = MenuSession::new(config, color);
    session.run(&mut rl, &mut io::stdout())?;

    debug!(
        calculations = session.calculator().history().len(),
        "session finished"
    );
    Ok(())
}
