use std::fmt;

use tracing::{debug, warn};

use crate::error::ReportError;
use crate::junit::junit_model::Suite;

use super::context::ReporterContext;
use super::document::{ScriptResult, TestRunDocument, TestRunItem, TESTRUN_STATUS_DONE};
use super::outcome::classify;
use super::status_counter::StatusCounter;

// ============================================================================
// Build output
// ============================================================================

/// A non-fatal problem found while building a testrun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    /// A case's name carries a different test case key than the one the
    /// suite adopted from its first case. The case was left out of the run.
    MultipleTestCaseKeys {
        suite: String,
        case: String,
        index: usize,
        expected_key: String,
        found_key: String,
    },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::MultipleTestCaseKeys {
                suite,
                case,
                index,
                expected_key,
                found_key,
            } => write!(
                f,
                "suite '{}' case #{} '{}' has test case key {}, expected {}; case skipped",
                suite, index, case, found_key, expected_key
            ),
        }
    }
}

/// A testrun document plus any warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTestRun {
    pub document: TestRunDocument,
    pub warnings: Vec<ReportWarning>,
}

// ============================================================================
// Builder
// ============================================================================

/// Converts XUnit suites into TM4J testrun documents.
///
/// Each suite becomes one testrun with a single item; each of its cases
/// becomes one script result.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    context: ReporterContext,
}

impl ReportBuilder {
    pub fn new(context: ReporterContext) -> Self {
        Self { context }
    }

    /// Build one testrun per suite, in order. Stops at the first suite that
    /// contains an unrecognized result.
    pub fn build_all(&self, suites: &[Suite]) -> Result<Vec<BuiltTestRun>, ReportError> {
        suites.iter().map(|suite| self.build(suite)).collect()
    }

    /// Build the testrun for a single suite.
    ///
    /// The first case's name fixes the suite's test case key. Later cases
    /// naming a different key are skipped with a warning; their position is
    /// still consumed, so the script result indexes keep a gap.
    pub fn build(&self, suite: &Suite) -> Result<BuiltTestRun, ReportError> {
        debug!(suite = %suite.name, cases = suite.cases.len(), "building testrun");

        let mut counter = StatusCounter::new();
        let mut script_results = Vec::with_capacity(suite.cases.len());
        let mut warnings = Vec::new();
        let mut shared_key: Option<String> = None;

        for (index, case) in suite.cases.iter().enumerate() {
            debug!(suite = %suite.name, index, case = %case.name, "test case");

            let status = classify(case.result.as_ref()).map_err(|marker| {
                ReportError::UnrecognizedOutcome {
                    suite: suite.name.clone(),
                    case: case.name.clone(),
                    marker,
                }
            })?;

            if let Some(key) = &shared_key {
                if !name_has_key(&case.name, key) {
                    let warning = ReportWarning::MultipleTestCaseKeys {
                        suite: suite.name.clone(),
                        case: case.name.clone(),
                        index,
                        expected_key: key.clone(),
                        found_key: test_case_key(&case.name),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            } else {
                shared_key = Some(test_case_key(&case.name));
            }

            counter.tally(status);
            script_results.push(ScriptResult {
                index,
                status,
                comment: case.name.clone(),
            });
        }

        let test_case_key = shared_key.unwrap_or_default();
        let document = TestRunDocument {
            project_key: project_key(&test_case_key).to_string(),
            name: suite.name.clone(),
            status: TESTRUN_STATUS_DONE.to_string(),
            items: vec![TestRunItem {
                test_case_key,
                status: counter.overall_status(),
                environment: self.context.environment.clone(),
                comment: self.context.comment.clone(),
                user_key: self.context.user_key.clone(),
                execution_time: suite.time,
                execution_date: suite.timestamp.clone(),
                script_results,
            }],
        };

        Ok(BuiltTestRun { document, warnings })
    }
}

// ============================================================================
// Test case key helpers
// ============================================================================

/// Derive a TM4J test case key from a test case name: the last two
/// `_`-separated tokens joined by `-`, so `test_login_TC_T2` gives `TC-T2`.
pub fn test_case_key(case_name: &str) -> String {
    let tokens: Vec<&str> = case_name.split('_').collect();
    let start = tokens.len().saturating_sub(2);
    tokens[start..].join("-")
}

/// The JIRA project part of a test case key (`TC` in `TC-T2`).
pub fn project_key(test_case_key: &str) -> &str {
    test_case_key
        .split_once('-')
        .map_or(test_case_key, |(project, _)| project)
}

/// Whether a test case name ends with the underscore form of `key`.
pub fn name_has_key(case_name: &str, key: &str) -> bool {
    case_name.ends_with(&key.replace('-', "_"))
}
