use std::collections::HashMap;

use super::outcome::Outcome;

// ============================================================================
// Suite status rollup
// ============================================================================

/// Counts the outcome of every test case in one suite and derives the
/// suite-wide status.
///
/// Precedence is Blocked > Fail > Pass > Not Executed: a single error
/// blocks the whole run, and a suite where nothing ran is Not Executed.
#[derive(Debug, Clone)]
pub struct StatusCounter {
    counts: HashMap<Outcome, usize>,
}

impl Default for StatusCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusCounter {
    /// All four outcomes start at zero.
    pub fn new() -> Self {
        Self {
            counts: Outcome::ALL.iter().map(|o| (*o, 0)).collect(),
        }
    }

    pub fn tally(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of tallied cases.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The worst-case status among everything tallied so far.
    pub fn overall_status(&self) -> Outcome {
        if self.count(Outcome::Blocked) > 0 {
            Outcome::Blocked
        } else if self.count(Outcome::Fail) > 0 {
            Outcome::Fail
        } else if self.count(Outcome::Pass) > 0 {
            Outcome::Pass
        } else {
            Outcome::NotExecuted
        }
    }
}

impl Extend<Outcome> for StatusCounter {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.tally(outcome);
        }
    }
}

impl FromIterator<Outcome> for StatusCounter {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}
