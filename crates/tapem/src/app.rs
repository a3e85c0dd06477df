//! Running one summarizing pass
//!
//! [`run`] is generic over its input and output so tests can drive it with
//! in-memory buffers; [`execute`] binds it to stdin (or `--file`) and stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use tapem_tap::{EXIT_IO_FAILURE, EXIT_OUTPUT_FAILURE, Report, Summary, TapemError, drain};
use tracing::{debug, info};

use crate::config::Config;

/// Echo `input` to `out`, then write the report
///
/// # Errors
///
/// Returns `TapemError` if the input can't be read or the output can't be
/// written. Malformed TAP is not an error.
pub fn run<R, W>(config: &Config, input: R, mut out: W) -> Result<Summary, TapemError>
where
    R: BufRead,
    W: Write,
{
    let summary = drain(input, &mut out, config.summarizer())?;
    Report::new(&summary, config.glyphs()).write_to(&mut out)?;

    info!(
        ok = summary.ok_count,
        not_ok = summary.not_ok_count,
        tap_errors = summary.error_count(),
        exit_code = summary.exit_code(),
        "Summarized TAP stream"
    );
    Ok(summary)
}

/// Open the configured input: the `--file` path, or stdin
///
/// # Errors
///
/// Returns an error if the file can't be opened.
pub fn open_input(config: &Config) -> anyhow::Result<Box<dyn BufRead>> {
    match &config.file {
        Some(path) => {
            debug!(path = %path.display(), "Reading TAP from file");
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            debug!("Reading TAP from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Validate the configuration, summarize the input to stdout, and return the
/// exit code the process should end with
///
/// # Errors
///
/// Returns an error if the input can't be opened or read, or stdout can't be
/// written.
pub fn execute(config: &Config) -> anyhow::Result<u8> {
    config.validate().context("Invalid configuration")?;
    let input = open_input(config)?;
    let stdout = io::stdout().lock();
    let summary = run(config, input, stdout).context("Failed to summarize TAP stream")?;
    Ok(summary.exit_code())
}

/// Exit code for a run that ended in `err`
///
/// Output failures get their own code so a closed stdout isn't reported as
/// bad input. Everything else (bad flags, unopenable or unreadable input)
/// maps to [`EXIT_IO_FAILURE`].
#[must_use]
pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TapemError>() {
        Some(TapemError::Write(_)) => EXIT_OUTPUT_FAILURE,
        _ => EXIT_IO_FAILURE,
    }
}
