//! Main entry point for webstat.

use std::error::Error;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};
use webstat::Pipeline;
use webstat_common::init_logging;
use webstat_config::ConfigLoader;

fn main() -> ExitCode {
    // Logging is configured from the file, so config errors go straight to stderr
    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging.to_options()) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    info!("Starting webstat");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match Pipeline::new(config).run(&mut out) {
        Ok(outcome) => {
            info!(
                sessions = outcome.summary.overview.total_sessions,
                charts = outcome.charts_rendered,
                "webstat finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), "webstat failed: {}", e);
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print `err` and its source chain to stderr
fn print_error(err: &dyn Error) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
