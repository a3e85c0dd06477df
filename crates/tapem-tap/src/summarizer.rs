//! Single-pass TAP summarizing
//!
//! [`Summarizer`] consumes lines one at a time and keeps the counters and
//! result lines needed for the report. [`drain`] wires it to a reader and
//! an echo writer so the original stream is passed through untouched
//! while it is being classified.
//!
//! # Example
//!
//! ```
//! use tapem_tap::summarizer::summarize;
//!
//! let summary = summarize("1..2\nok 1\nnot ok 2\n");
//! assert_eq!(summary.ok_count, 1);
//! assert_eq!(summary.not_ok_count, 1);
//! assert_eq!(summary.exit_code(), 1);
//! ```

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::TapemError;
use crate::line::{LineKind, Plan, TestLine, classify};
use crate::protocol::ProtocolChecker;

/// Highest exit code produced for failing runs
pub const EXIT_CODE_CAP: u8 = 100;

/// Exit code reserved for unreadable input; never produced by [`Summary::exit_code`]
pub const EXIT_IO_FAILURE: u8 = 120;

/// Exit code reserved for an unwritable echo or report
pub const EXIT_OUTPUT_FAILURE: u8 = 121;

// ============================================================================
// Summary
// ============================================================================

/// Counters and result lines collected from one TAP stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// `ok` and `not ok` lines in input order
    pub results: Vec<TestLine>,
    /// Number of `ok` lines
    pub ok_count: usize,
    /// Number of `not ok` lines
    pub not_ok_count: usize,
    /// Number of lines that were neither blank, a plan, nor a result
    pub unrecognized_count: usize,
    /// Strict-mode protocol errors, in the order they were found
    pub protocol_errors: Vec<String>,
    /// First plan line seen, if any
    pub plan: Option<Plan>,
}

impl Summary {
    /// Total TAP errors: unrecognized lines plus protocol errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.unrecognized_count + self.protocol_errors.len()
    }

    /// Check if there were no failures and no TAP errors
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.not_ok_count == 0 && self.error_count() == 0
    }

    /// Check if every test failed
    ///
    /// Needs at least one `not ok` line and no `ok` line. When a plan was
    /// seen, it must also be fully reported: `1..3` followed by a single
    /// `not ok` leaves two tests unaccounted for.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.ok_count == 0
            && self.not_ok_count > 0
            && self.plan.is_none_or(|plan| self.results.len() >= plan.len())
    }

    /// Get failing tests
    #[must_use]
    pub fn failing_tests(&self) -> Vec<&TestLine> {
        self.results.iter().filter(|r| r.failed()).collect()
    }

    /// Process exit code for this run
    ///
    /// `0` on full success, otherwise the number of failures plus TAP
    /// errors, capped at [`EXIT_CODE_CAP`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        let problems = self.not_ok_count + self.error_count();
        u8::try_from(problems.min(usize::from(EXIT_CODE_CAP))).unwrap_or(EXIT_CODE_CAP)
    }
}

// ============================================================================
// Summarizer
// ============================================================================

/// An accumulating TAP line classifier
#[derive(Debug, Default)]
pub struct Summarizer {
    summary: Summary,
    protocol: Option<ProtocolChecker>,
    line_no: usize,
}

impl Summarizer {
    /// Create a summarizer that only counts results
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a summarizer that also validates test numbers against plans
    #[must_use]
    pub fn strict() -> Self {
        Self {
            protocol: Some(ProtocolChecker::new()),
            ..Self::default()
        }
    }

    /// Process a single line of input and return its classification
    pub fn process_line(&mut self, line: &str) -> LineKind {
        self.line_no += 1;
        let kind = classify(line);

        match &kind {
            LineKind::Blank => {}
            LineKind::Plan(plan) => {
                debug!(line = self.line_no, %plan, "plan line");
                self.summary.plan.get_or_insert(*plan);
                if let Some(protocol) = self.protocol.as_mut() {
                    protocol.plan(*plan);
                }
            }
            LineKind::Result(test) => {
                if test.passed() {
                    self.summary.ok_count += 1;
                } else {
                    self.summary.not_ok_count += 1;
                }
                if let (Some(protocol), Some(number)) = (self.protocol.as_mut(), test.number) {
                    protocol.result(number);
                }
                self.summary.results.push(test.clone());
            }
            LineKind::Unrecognized(text) => {
                debug!(line = self.line_no, text = %text, "unrecognized TAP line");
                self.summary.unrecognized_count += 1;
            }
        }

        kind
    }

    /// Finalize and return summary
    #[must_use]
    pub fn finish(self) -> Summary {
        let mut summary = self.summary;
        if let Some(protocol) = self.protocol {
            summary.protocol_errors = protocol.finish(summary.results.len());
            for error in &summary.protocol_errors {
                debug!(%error, "TAP protocol error");
            }
        }
        summary
    }
}

// ============================================================================
// Driving functions
// ============================================================================

/// Summarize a complete TAP document held in memory
#[must_use]
pub fn summarize(input: &str) -> Summary {
    let mut summarizer = Summarizer::new();
    for line in input.lines() {
        summarizer.process_line(line);
    }
    summarizer.finish()
}

/// Read every line from `reader`, echo it verbatim to `echo`, and classify it
///
/// Line terminators are passed through as read. If the last line has no
/// terminator, a newline is added after it so that whatever follows starts
/// on a fresh line.
///
/// # Errors
///
/// Returns `TapemError::Read` if the input cannot be read (including invalid
/// UTF-8) and `TapemError::Write` if the echo cannot be written.
pub fn drain<R, W>(mut reader: R, mut echo: W, mut summarizer: Summarizer) -> Result<Summary, TapemError>
where
    R: BufRead,
    W: Write,
{
    let mut buf = String::new();
    let mut terminated = true;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(TapemError::Read)?;
        if read == 0 {
            break;
        }
        echo.write_all(buf.as_bytes()).map_err(TapemError::Write)?;
        terminated = buf.ends_with('\n');
        summarizer.process_line(&buf);
    }

    if !terminated {
        echo.write_all(b"\n").map_err(TapemError::Write)?;
    }
    echo.flush().map_err(TapemError::Write)?;

    Ok(summarizer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    const BASIC: &str = "1..4
ok 1 - Input file opened
not ok 2 - First line of the input valid
ok 3 - Read the rest of the file
not ok 4 - Summarized correctly # TODO Not written yet
";

    #[test]
    fn test_summarize_basic() {
        let summary = summarize(BASIC);
        assert_eq!(summary.ok_count, 2);
        assert_eq!(summary.not_ok_count, 2);
        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.exit_code(), 2);
        assert_eq!(summary.plan, Some(Plan { start: 1, end: 4 }));
        assert!(!summary.all_passed());
        assert!(!summary.all_failed());

        let failing: Vec<&str> = summary
            .failing_tests()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(
            failing,
            vec![
                "not ok 2 - First line of the input valid",
                "not ok 4 - Summarized correctly # TODO Not written yet",
            ]
        );
    }

    #[test]
    fn test_plan_only_passes() {
        let summary = summarize("1..0\n");
        assert!(summary.all_passed());
        assert_eq!(summary.exit_code(), 0);
        assert!(summary.results.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize("");
        assert_eq!(summary, Summary::default());
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_unrecognized_lines_count_as_errors() {
        let summary = summarize("1..1\nok 1\n# diagnostic\ngarbage\n");
        assert_eq!(summary.ok_count, 1);
        assert_eq!(summary.unrecognized_count, 2);
        assert_eq!(summary.error_count(), 2);
        assert_eq!(summary.exit_code(), 2);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let summary = summarize("\n1..2\n\nok 1\n   \nok 2\n\n");
        assert_eq!(summary.ok_count, 2);
        assert_eq!(summary.error_count(), 0);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_exit_code_is_capped() {
        let input = "not ok\n".repeat(250);
        let summary = summarize(&input);
        assert_eq!(summary.not_ok_count, 250);
        assert_eq!(summary.exit_code(), EXIT_CODE_CAP);
        assert!(summary.all_failed());
    }

    #[test]
    fn test_partial_run_is_not_all_failed() {
        let summary = summarize("1..3\nnot ok 1\n");
        assert_eq!(summary.not_ok_count, 1);
        assert!(!summary.all_failed());

        let summary = summarize("1..2\nnot ok 1\nnot ok 2\n");
        assert!(summary.all_failed());
    }

    #[test]
    fn test_status_prefix_counts_as_result() {
        let summary = summarize("1..2\nokay then\nnot okay\n");
        assert_eq!(summary.ok_count, 1);
        assert_eq!(summary.not_ok_count, 1);
        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_strict_summarizer_reports_protocol_errors() {
        let mut summarizer = Summarizer::strict();
        for line in ["1..2", "ok 1", "ok 1", "ok 3"] {
            summarizer.process_line(line);
        }
        let summary = summarizer.finish();
        assert_eq!(
            summary.protocol_errors,
            vec![
                "Multiple results for test no. 1".to_string(),
                "Test result 3 doesn't fit into any previous range".to_string(),
                "More test results than possible for test range: 3/2".to_string(),
            ]
        );
        assert_eq!(summary.error_count(), 3);
        assert_eq!(summary.exit_code(), 3);
    }

    #[test]
    fn test_lenient_summarizer_ignores_numbering() {
        let mut summarizer = Summarizer::new();
        for line in ["ok 1", "ok 1", "ok 3"] {
            summarizer.process_line(line);
        }
        let summary = summarizer.finish();
        assert_eq!(summary.results.len(), 3);
        assert!(summary.protocol_errors.is_empty());
        assert!(summary.all_passed());
    }

    #[test]
    fn test_drain_echoes_verbatim() {
        let input = "1..2\r\nok 1 - a\r\n\n  not ok 2 - b\n";
        let mut echo = Vec::new();
        let summary = drain(input.as_bytes(), &mut echo, Summarizer::new()).expect("drain");
        assert_eq!(String::from_utf8(echo).expect("utf8"), input);
        assert_eq!(summary.ok_count, 1);
        assert_eq!(summary.not_ok_count, 1);
        assert_eq!(summary.results[1].text, "not ok 2 - b");
    }

    #[test]
    fn test_drain_terminates_last_line() {
        let mut echo = Vec::new();
        let summary = drain("ok 1".as_bytes(), &mut echo, Summarizer::new()).expect("drain");
        assert_eq!(echo, b"ok 1\n");
        assert_eq!(summary.ok_count, 1);
    }

    #[test]
    fn test_drain_rejects_invalid_utf8() {
        let input: &[u8] = b"ok 1\n\xff\xfe\n";
        let result = drain(input, Vec::new(), Summarizer::new());
        assert!(matches!(result, Err(TapemError::Read(_))));
    }
}
