use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use santander_ynab::cli;
use santander_ynab::logging::init_logger;
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;

/// santander-ynab: convert the Santander Excel export in the current
/// directory into a CSV file that YNAB can import.
///
/// The first `.xls`/`.xlsx` file found is converted and written next to it as
/// `<name>_ynab.csv`.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level, &[env!("CARGO_CRATE_NAME")]);
    debug!("Log level set to {}", args.log_level);

    match main_inner() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn main_inner() -> Result<()> {
    let dir = std::env::current_dir().context("Unable to determine the working directory")?;
    let discovery = cli::discover_input(&dir)?;

    if !discovery.ignored.is_empty() {
        let all: Vec<_> = discovery.all().map(display_name).collect();
        println!("Found multiple Excel files: {}", all.join(", "));
        println!("Using: {}", display_name(&discovery.selected));
        let ignored: Vec<_> = discovery.ignored.iter().map(|p| display_name(p)).collect();
        println!("Ignoring: {}", ignored.join(", "));
    }

    println!("Converting: {}", display_name(&discovery.selected));
    println!("{}", "-".repeat(50));

    let summary = cli::convert_to_csv(&discovery.selected)
        .with_context(|| format!("Failed to convert {}", display_name(&discovery.selected)))?;
    let output = display_name(&summary.output);

    println!("✓ Converted {} transactions", summary.transactions);
    println!("✓ Saved to: {}", output);
    println!("\nYou can now import '{}' into YNAB!", output);

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
