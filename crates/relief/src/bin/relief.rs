//! # Relief
//!
//! Generates terrain from a control heights file and reports the result.
//!
//! ## Usage
//!
//! ```bash
//! relief generate --config data/terrain.toml
//! relief generate --heights data/initial_terrain1.txt --roughness 0.5 --seed 42
//! relief inspect data/initial_terrain1.txt
//! ```
//!
//! Set `RUST_LOG=relief_procedural=debug` for per-stage timings.

use std::process::ExitCode;

use clap::Parser;
use relief::{execute, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match execute(&cli.command) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
