use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use tax_cli::app;
use tax_core::db::DbConfig;
use tax_core::{AdminService, TaxService};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive income tax calculator.
///
/// Opens the configured deduction store, runs one command and prints the
/// result as JSON.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version)]
struct Cli {
    /// Deduction store backend to use.
    #[arg(long, env = "TAX_DB_BACKEND", default_value = "memory")]
    backend: String,

    /// Backend connection string.
    /// For `memory` this is empty, `:defaults:` or a TOML seed file path.
    #[arg(long, env = "TAX_DB", default_value = ":defaults:")]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute tax for one JSON request read from FILE, or stdin when omitted.
    Calculate { file: Option<PathBuf> },

    /// Compute tax for every row of a CSV file.
    UploadCsv { file: PathBuf },

    /// Change a configured deduction amount from a `{"amount": n}` body read
    /// from FILE, or stdin when omitted.
    SetDeduction {
        /// One of `personal`, `donation`, `k-receipt`.
        slug: String,
        file: Option<PathBuf>,
    },

    /// Show the deductions in effect, defaults included.
    Deductions,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`.
/// * Writes to stderr so stdout carries only JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

async fn run(cli: Cli) -> Result<String> {
    let db_config = DbConfig {
        backend: cli.backend,
        connection_string: cli.db,
    };
    let repo = app::open_repository(&db_config).await?;

    match cli.command {
        Command::Calculate { file } => {
            let input = read_input(file.as_ref())?;
            app::calculate(&TaxService::new(repo), &input).await
        }
        Command::UploadCsv { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open: {}", file.display()))?;
            app::upload_csv(&TaxService::new(repo), reader).await
        }
        Command::SetDeduction { slug, file } => {
            let input = read_input(file.as_ref())?;
            app::set_deduction(&AdminService::new(repo), &slug, &input).await
        }
        Command::Deductions => app::list_deductions(&TaxService::new(repo)).await,
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
