//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the tracing subscriber
//! - dispatches to the collect / fit / export pipelines

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::{Cli, Command};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tidefit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // `collect` narrates progress on stdout; `fit` keeps stdout for the score alone.
    init_tracing(matches!(cli.command, Command::Collect(_)));

    match cli.command {
        Command::Collect(args) => {
            let path = pipeline::run_collect(&args)?;
            tracing::info!("Done. Data saved in {}", path.display());
        }
        Command::Fit(args) => {
            let r2 = pipeline::run_fit(&args)?;
            println!("{r2}");
        }
        Command::Export(args) => {
            let rows = pipeline::run_export(&args)?;
            tracing::info!(rows, "exported {}", args.out.display());
        }
    }

    Ok(())
}

fn init_tracing(to_stdout: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = if to_stdout {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();
}
