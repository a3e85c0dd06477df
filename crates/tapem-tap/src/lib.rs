// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tapem-tap: TAP stream summarizing for tapem
//!
//! This library crate classifies Test Anything Protocol lines, keeps the
//! counts a run needs, renders the emoji report shown after the echoed
//! stream, and decides the process exit code.
//!
//! # Example
//!
//! ```
//! use tapem_tap::{Glyphs, Report, Summarizer, drain};
//!
//! let input = "1..2\nok 1 - opened\nnot ok 2 - parsed\n";
//! let mut echo = Vec::new();
//! let summary = drain(input.as_bytes(), &mut echo, Summarizer::new()).unwrap();
//!
//! assert_eq!(echo, input.as_bytes());
//! assert_eq!(summary.exit_code(), 1);
//!
//! let report = Report::new(&summary, Glyphs::EMOJI);
//! assert!(report.to_string().contains("Summary: 1 ok  |  1 not ok  |  0 tap errors"));
//! ```

pub mod error;
pub mod line;
pub mod protocol;
pub mod report;
pub mod summarizer;

pub use error::TapemError;
pub use line::{LineKind, Plan, Status, TestLine, classify};
pub use report::{Glyphs, Report};
pub use summarizer::{EXIT_CODE_CAP, EXIT_IO_FAILURE, EXIT_OUTPUT_FAILURE, Summarizer, Summary, drain, summarize};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TapemError;
    pub use crate::line::{LineKind, TestLine};
    pub use crate::report::{Glyphs, Report};
    pub use crate::summarizer::{Summarizer, Summary, drain};
}
