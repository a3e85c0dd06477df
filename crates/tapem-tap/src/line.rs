//! TAP line classification
//!
//! Every input line falls into exactly one [`LineKind`]. Classification is
//! done on the trimmed text, so indentation and trailing `\r` are ignored.

use std::fmt;

/// A plan line such as `1..4`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// First planned test number
    pub start: u64,
    /// Last planned test number
    pub end: u64,
}

impl Plan {
    /// Parse a single `M..N` word
    ///
    /// Both sides must be plain non-negative integers. A reversed range
    /// (`5..1`) still parses; strict mode reports it separately.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let (start, end) = word.split_once("..")?;
        if !is_number(start) || !is_number(end) {
            return None;
        }
        Some(Self {
            start: start.parse().ok()?,
            end: end.parse().ok()?,
        })
    }

    /// Whether `number` is covered by this plan
    #[must_use]
    pub fn contains(&self, number: u64) -> bool {
        (self.start..=self.end).contains(&number)
    }

    /// Number of tests this plan declares
    #[must_use]
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            usize::try_from(self.end - self.start)
                .unwrap_or(usize::MAX)
                .saturating_add(1)
        }
    }

    /// Whether the plan declares no tests
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Status of a test result line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `ok` line
    Ok,
    /// `not ok` line
    NotOk,
}

/// A classified `ok` / `not ok` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLine {
    /// The trimmed line text, directive included
    pub text: String,
    /// Whether the test passed
    pub status: Status,
    /// Test number following the status word, if present
    pub number: Option<u64>,
}

impl TestLine {
    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Ok
    }

    /// Check if the test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == Status::NotOk
    }
}

/// Classification of a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line
    Blank,
    /// Plan line, not counted
    Plan(Plan),
    /// Test result line
    Result(TestLine),
    /// Anything else; counted as a TAP error
    Unrecognized(String),
}

/// Classify one line of TAP
///
/// `not ok` is checked before `ok`; any line starting with either is a
/// result, whatever follows.
#[must_use]
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if let Some(plan) = trimmed.split_whitespace().next().and_then(Plan::parse) {
        return LineKind::Plan(plan);
    }

    let (status, rest) = if let Some(rest) = trimmed.strip_prefix("not ok") {
        (Status::NotOk, rest)
    } else if let Some(rest) = trimmed.strip_prefix("ok") {
        (Status::Ok, rest)
    } else {
        return LineKind::Unrecognized(trimmed.to_string());
    };

    LineKind::Result(TestLine {
        text: trimmed.to_string(),
        status,
        number: test_number(rest),
    })
}

/// The test number is the first word after the status, when it is numeric
fn test_number(rest: &str) -> Option<u64> {
    rest.split_whitespace()
        .next()
        .filter(|word| is_number(word))
        .and_then(|word| word.parse().ok())
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
