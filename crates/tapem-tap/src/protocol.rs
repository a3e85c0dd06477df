//! Strict numbering checks
//!
//! Plain summarizing only cares about `ok` / `not ok`. In strict mode the
//! test numbers are also validated against the plan lines seen so far,
//! and every violation becomes a protocol error that counts against the
//! run.

use std::collections::HashSet;

use crate::line::Plan;

/// Tracks plans and result numbers and collects protocol errors
#[derive(Debug, Default)]
pub struct ProtocolChecker {
    plans: Vec<Plan>,
    seen: HashSet<u64>,
    errors: Vec<String>,
}

impl ProtocolChecker {
    /// Create a checker with no plans and no results
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a plan line
    pub fn plan(&mut self, plan: Plan) {
        if plan.start > plan.end {
            self.errors.push(format!("Invalid range: {plan}"));
            return;
        }

        let overlaps: Vec<u64> = self
            .plans
            .iter()
            .filter_map(|earlier| {
                let low = earlier.start.max(plan.start);
                let high = earlier.end.min(plan.end);
                (low <= high).then_some(low)
            })
            .collect();
        for at in overlaps {
            self.errors
                .push(format!("Overlapping range '{plan}' at '{at}'"));
        }

        self.plans.push(plan);
    }

    /// Record a result line's test number
    pub fn result(&mut self, number: u64) {
        if self.plans.is_empty() {
            self.errors.push(format!(
                "No test range defined before result no. {number}"
            ));
        } else if !self.plans.iter().any(|plan| plan.contains(number)) {
            self.errors.push(format!(
                "Test result {number} doesn't fit into any previous range"
            ));
        }

        if !self.seen.insert(number) {
            self.errors
                .push(format!("Multiple results for test no. {number}"));
        }
    }

    /// Number of distinct test numbers covered by all plans
    #[must_use]
    pub fn planned(&self) -> usize {
        let mut ranges: Vec<(u64, u64)> = self
            .plans
            .iter()
            .map(|plan| (plan.start, plan.end))
            .collect();
        ranges.sort_unstable();

        let mut total = 0usize;
        let mut current: Option<(u64, u64)> = None;
        for (start, end) in ranges {
            current = match current {
                Some((low, high)) if start <= high.saturating_add(1) => {
                    Some((low, high.max(end)))
                }
                Some((low, high)) => {
                    total = total.saturating_add(span(low, high));
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }
        if let Some((low, high)) = current {
            total = total.saturating_add(span(low, high));
        }
        total
    }

    /// Run the end-of-stream checks and return every protocol error
    ///
    /// `results` is the number of `ok` / `not ok` lines seen.
    #[must_use]
    pub fn finish(mut self, results: usize) -> Vec<String> {
        let planned = self.planned();
        let numbers = self.seen.len();

        if planned == 0 {
            self.errors.push("No test range found".to_string());
        }
        if results == 0 {
            self.errors.push("No test results found".to_string());
        }
        if numbers > planned || results > planned {
            self.errors.push(format!(
                "More test results than possible for test range: {}/{}",
                numbers.max(results),
                planned
            ));
        }

        self.errors
    }
}

/// Count of numbers in `low..=high`, saturating at `usize::MAX`
fn span(low: u64, high: u64) -> usize {
    usize::try_from(high - low)
        .unwrap_or(usize::MAX)
        .saturating_add(1)
}
