//! Command line runner for lucy IR filetests.
//!
//! Exits with status 0 when every case passes and 1 otherwise, including for
//! bad arguments and missing directories.

mod args;

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use lucy_filetests::{Reporter, run_filetests};

use crate::args::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Help and version go to stdout and are not errors
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every case passed.
fn run(args: &Args) -> Result<bool> {
    log::debug!("{args:?}");
    let config = args.to_config()?;

    let color = args.color_enabled(env::var_os("NO_COLOR").as_deref());
    let mut reporter = Reporter::new(io::stdout().lock()).with_color(color);
    let summary = run_filetests(&args.dir, &config, &mut reporter)
        .with_context(|| format!("failed to run filetests in {}", args.dir.display()))?;

    Ok(summary.all_passed())
}
