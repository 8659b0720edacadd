//! cdigest - CLI entry point
//!
//! This module contains the main function that serves as the entry point
//! for the cdigest command-line tool. It handles argument parsing,
//! configuration loading, logging setup, and delegates to the core library
//! functions.

use cdigest::{run_digest, Args, Config, Result};
use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::path::Path;
use std::process;

fn main() {
    let args = Args::parse();

    // Initialize logger with RUST_LOG env var support
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    // Run the main logic
    if let Err(e) = run(&args) {
        log::error!("Error: {}", e);
        eprintln!("Error: {}", e);

        // Print chain of errors if any
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {}", err);
            source = err.source();
        }

        process::exit(1);
    }
}

/// Main application logic
///
/// This function handles configuration loading, validates arguments,
/// and calls the analysis and digest generation functions.
fn run(args: &Args) -> Result<()> {
    // Load configuration from ~/.cdigest.toml if it exists
    let config = Config::load()?;

    // Get the target path
    let path = Path::new(&args.path);

    // Validate path exists
    if !path.exists() {
        return Err(cdigest::Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Path does not exist: {}", path.display()),
        )));
    }

    run_digest(path, args, &config)
}
