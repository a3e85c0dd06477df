// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for tapem-tap

use thiserror::Error;

/// Errors that can occur while summarizing a TAP stream
///
/// Malformed TAP is never an error here: it is counted and reported.
/// Only failing to move bytes in or out stops a run.
#[derive(Debug, Error)]
pub enum TapemError {
    /// Error reading the TAP input
    #[error("failed to read TAP input: {0}")]
    Read(#[source] std::io::Error),

    /// Error writing the echo or the report
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}
