//! tapem: TAP summarizer
//!
//! Reads TAP from stdin (or `--file`), echoes it, prints an emoji report and
//! exits with a code derived from the number of failures and TAP errors.

use std::process::ExitCode;

use clap::Parser;
use tapem::app;
use tapem::config::Config;
use tracing::error;

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr so they never mix with the report on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match app::execute(&config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(app::failure_exit_code(&e))
        }
    }
}
