//! # structsig CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr; stdout carries records and verification results.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use structsig_cli::nodal::{run_nodal, NodalArgs};
use structsig_cli::sequential::{run_sequential, SequentialArgs};
use structsig_cli::EXIT_ERROR;

/// Structured multi-signatures over text and file fields.
///
/// Each signer attests to a chosen scope of fields, either independently
/// (nodal) or as a chain that binds every earlier signature (sequential).
#[derive(Parser, Debug)]
#[command(name = "structsig", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Independent single-signer signatures.
    Nodal(NodalArgs),

    /// Chained signatures, verified in signing order.
    #[command(name = "seq")]
    Sequential(SequentialArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "structsig starting");

    let result = match cli.command {
        Commands::Nodal(args) => run_nodal(&args),
        Commands::Sequential(args) => run_sequential(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
