//! CLI Adapter.

mod local;
mod production;
mod summary;

use std::path::PathBuf;

use clap::Parser;

use crate::app::api::{self, GenerateOptions};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "deploygen")]
#[command(version)]
#[command(about = "Generate configuration bundles for a LiveKit deployment", long_about = None)]
struct Cli {
    /// Generate a config for local testing without any prompts
    #[arg(short = 'l', long)]
    local: bool,
    /// Directory the bundle directory is created in
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// TOML file overriding ports, images and install locations
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Entry point for the CLI.
///
/// `in_container` is detected once by the caller at process start.
pub fn run(in_container: bool) {
    let cli = Cli::parse();

    if let Err(e) = execute(cli, in_container) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli, in_container: bool) -> Result<(), AppError> {
    let defaults = api::load_defaults(cli.config.as_deref())?;
    let output_root = cli.output_dir.unwrap_or_else(|| api::default_output_root(in_container));
    tracing::debug!(output_root = %output_root.display(), local = cli.local, "starting");
    let options = GenerateOptions::new(output_root).with_defaults(defaults);

    if cli.local {
        local::run_local(&options, in_container)
    } else {
        production::run_production(&options)
    }
}
