//! Report rendering
//!
//! The report is what follows the echoed TAP stream: the re-listed
//! results, the failures, any protocol errors, the counts and a banner.

use std::fmt;
use std::io::Write;

use crate::error::TapemError;
use crate::summarizer::Summary;

/// The set of markers used to annotate report lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Marks an `ok` line
    pub success: &'static str,
    /// Marks a `not ok` line
    pub failure: &'static str,
    /// Results header
    pub tap: &'static str,
    /// Stands for TAP errors in the banner tally
    pub tap_error: &'static str,
    /// Success banner
    pub great_success: &'static str,
    /// Failure banner and protocol error lines
    pub disaster: &'static str,
    /// Section headers for problems
    pub attention: &'static str,
}

impl Glyphs {
    /// Emoji markers
    pub const EMOJI: Self = Self {
        success: "✅",
        failure: "❌",
        tap: "🚰",
        tap_error: "🚱",
        great_success: "🎉",
        disaster: "🔥",
        attention: "\u{26a0}\u{fe0f}",
    };

    /// Plain ASCII emoticons for terminals without emoji
    pub const ASCII: Self = Self {
        success: ":-)",
        failure: ":-(",
        tap: "^.^",
        tap_error: "o.O",
        great_success: "\\o/",
        disaster: ">.<",
        attention: "!! ",
    };

    /// Pick a glyph set
    #[must_use]
    pub fn new(ascii: bool) -> Self {
        if ascii { Self::ASCII } else { Self::EMOJI }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::EMOJI
    }
}

/// Format `text` behind a marker column
#[must_use]
pub fn prefixed(glyph: &str, text: &str) -> String {
    format!("{glyph}  | {text}")
}

/// The post-echo report for a [`Summary`]
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    summary: &'a Summary,
    glyphs: Glyphs,
}

impl<'a> Report<'a> {
    /// Create a report for `summary` using `glyphs`
    #[must_use]
    pub fn new(summary: &'a Summary, glyphs: Glyphs) -> Self {
        Self { summary, glyphs }
    }

    /// The plain count line, e.g. `2 ok  |  2 not ok  |  0 tap errors`
    #[must_use]
    pub fn counts(&self) -> String {
        format!(
            "{} ok  |  {} not ok  |  {} tap errors",
            self.summary.ok_count,
            self.summary.not_ok_count,
            self.summary.error_count()
        )
    }

    /// The count line with glyphs instead of words, used in the banner
    #[must_use]
    pub fn tally(&self) -> String {
        let g = &self.glyphs;
        format!(
            "{} {}  |  {} {}  |  {} {}",
            self.summary.ok_count,
            g.success,
            self.summary.not_ok_count,
            g.failure,
            self.summary.error_count(),
            g.tap_error
        )
    }

    /// The final banner line
    #[must_use]
    pub fn banner(&self) -> String {
        let g = &self.glyphs;
        if self.summary.all_passed() {
            prefixed(
                g.great_success,
                &format!("All tests successful - {}", self.tally()),
            )
        } else {
            let some_all = if self.summary.all_failed() {
                "All"
            } else {
                "Some"
            };
            prefixed(
                g.disaster,
                &format!("{some_all} tests failed - {}", self.tally()),
            )
        }
    }

    /// Render every report line in output order
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let g = &self.glyphs;
        let summary = self.summary;
        let mut lines = Vec::new();

        lines.push(String::new());
        lines.push(prefixed(g.tap, "TAP Test results:"));
        for result in &summary.results {
            let glyph = if result.passed() { g.success } else { g.failure };
            lines.push(prefixed(glyph, &result.text));
        }

        let failures = summary.failing_tests();
        if !failures.is_empty() {
            lines.push(String::new());
            lines.push(prefixed(g.attention, "Test failures:"));
            for failure in failures {
                lines.push(prefixed(g.failure, &failure.text));
            }
        }

        if !summary.protocol_errors.is_empty() {
            lines.push(String::new());
            lines.push(prefixed(g.attention, "Protocol error(s) were found:"));
            for error in &summary.protocol_errors {
                lines.push(prefixed(g.disaster, error));
            }
        }

        lines.push(String::new());
        lines.push(format!("Summary: {}", self.counts()));
        lines.push(self.banner());
        lines
    }

    /// Write the report, one line at a time
    ///
    /// # Errors
    ///
    /// Returns `TapemError::Write` if the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), TapemError> {
        for line in self.lines() {
            writeln!(writer, "{line}").map_err(TapemError::Write)?;
        }
        writer.flush().map_err(TapemError::Write)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
