use std::fmt;

use serde::{Deserialize, Serialize};

use crate::junit::junit_model::ResultMarker;

// ============================================================================
// TM4J outcome categories
// ============================================================================

/// The TM4J status of a single executed test case.
///
/// Serialized as the exact strings the TM4J `/testrun` endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// An error occurred while running the case (not an assertion failure)
    Blocked,

    /// An assertion or expectation failed
    Fail,

    /// The case was skipped
    #[serde(rename = "Not Executed")]
    NotExecuted,

    /// The case ran with no error, failure or skip marker
    Pass,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::Blocked,
        Outcome::Fail,
        Outcome::NotExecuted,
        Outcome::Pass,
    ];

    /// The TM4J status string.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Blocked => "Blocked",
            Outcome::Fail => "Fail",
            Outcome::NotExecuted => "Not Executed",
            Outcome::Pass => "Pass",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Map a raw XUnit result marker onto a TM4J outcome.
///
/// `None` means the case carried no marker and therefore passed. An
/// unrecognized marker is returned as `Err` with the raw tag so the caller
/// can report it.
pub fn classify(marker: Option<&ResultMarker>) -> Result<Outcome, String> {
    match marker {
        None => Ok(Outcome::Pass),
        Some(ResultMarker::Error { .. }) => Ok(Outcome::Blocked),
        Some(ResultMarker::Failure { .. }) => Ok(Outcome::Fail),
        Some(ResultMarker::Skipped { .. }) => Ok(Outcome::NotExecuted),
        Some(ResultMarker::Other { tag }) => Err(tag.clone()),
    }
}
