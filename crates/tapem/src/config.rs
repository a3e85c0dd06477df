//! Configuration for the tapem command
//!
//! Everything is given on the command line. With no flags, tapem reads TAP
//! from stdin, reports with emoji, and only counts results.

use std::path::PathBuf;

use clap::Parser;
use tapem_tap::{Glyphs, Summarizer};

/// Summarize TAP test output with an emoji report and a meaningful exit code
///
/// The input is echoed unchanged, followed by the report. The exit code is 0
/// when every test passed and the stream was well formed, otherwise the
/// number of failures plus TAP errors (capped at 100).
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tapem")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Read TAP from this file instead of stdin
    #[arg(short, long, env = "TAPEM_FILE")]
    pub file: Option<PathBuf>,

    /// Use ASCII emoticons instead of emoji
    #[arg(short, long, default_value = "false")]
    pub ascii: bool,

    /// Validate test numbers against the plan
    ///
    /// Duplicate numbers, numbers outside the plan, a missing plan and more
    /// results than planned are reported as protocol errors and count as
    /// TAP errors.
    #[arg(long, default_value = "false")]
    pub strict: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs go to stderr; stdout only carries the echo and the report.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only log errors
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an input file is given but doesn't exist or isn't
    /// a regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.file {
            if !file.exists() {
                return Err(ConfigError::InputNotFound(file.clone()));
            }
            if !file.is_file() {
                return Err(ConfigError::InputNotFile(file.clone()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    ///
    /// Verbose wins over quiet. The default is WARN so a normal run writes
    /// nothing to stderr.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        }
    }

    /// Glyph set for the report
    #[must_use]
    pub fn glyphs(&self) -> Glyphs {
        Glyphs::new(self.ascii)
    }

    /// A fresh summarizer matching the `--strict` flag
    #[must_use]
    pub fn summarizer(&self) -> Summarizer {
        if self.strict {
            Summarizer::strict()
        } else {
            Summarizer::new()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input file not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.file.is_none());
        assert!(!config.ascii);
        assert!(!config.strict);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(Config::default().glyphs(), Glyphs::EMOJI);
        let config = Config {
            ascii: true,
            ..Default::default()
        };
        assert_eq!(config.glyphs(), Glyphs::ASCII);
    }

    #[test]
    fn test_validate_no_file() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_nonexistent_file() {
        let config = Config {
            file: Some(PathBuf::from("/nonexistent/path/12345.tap")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFound(_))));
    }

    #[test]
    fn test_validate_directory_is_not_a_file() {
        let config = Config {
            file: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFile(_))));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
