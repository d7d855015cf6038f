use serde::{Deserialize, Serialize};

use super::outcome::Outcome;

// ============================================================================
// TM4J "/testrun" JSON payload
// ============================================================================

/// The testrun status TM4J expects on every submitted run.
pub const TESTRUN_STATUS_DONE: &str = "Done";

/// One TM4J testrun, built from one XUnit suite.
///
/// Field names serialize in camelCase to match the TM4J REST payload:
/// ```json
/// {
///   "projectKey": "TC",
///   "name": "Example REST API Suite",
///   "status": "Done",
///   "items": [{ "testCaseKey": "TC-T1", "status": "Pass", ... }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunDocument {
    pub project_key: String,
    pub name: String,
    pub status: String,
    pub items: Vec<TestRunItem>,
}

/// The single execution item of a testrun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunItem {
    pub test_case_key: String,

    /// Worst-case status over all script results
    pub status: Outcome,

    /// JIRA test environment name (must match exactly)
    pub environment: String,

    pub comment: String,

    /// JIRA user key of the test analyst
    pub user_key: String,

    /// Seconds
    pub execution_time: f64,

    pub execution_date: String,

    pub script_results: Vec<ScriptResult>,
}

/// Outcome of one test case within the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Position of the case within its suite (0-indexed)
    pub index: usize,
    pub status: Outcome,
    /// The case name
    pub comment: String,
}

impl TestRunDocument {
    /// The only item; every document is built with exactly one.
    pub fn item(&self) -> Option<&TestRunItem> {
        self.items.first()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
