use pretty_assertions::assert_eq;
use serde_json::json;

use tm4j_report::error::ReportError;
use tm4j_report::junit::junit_model::{Case, ResultMarker, Suite};
use tm4j_report::testrun::builder::{ReportBuilder, ReportWarning};
use tm4j_report::testrun::context::ReporterContext;
use tm4j_report::testrun::outcome::Outcome;

// ============================================================================
// Helper builders
// ============================================================================

fn context() -> ReporterContext {
    ReporterContext::new("username")
        .with_comment("This is only a test. If it had been an actual emergency...")
        .with_environment("REST API")
}

fn builder() -> ReportBuilder {
    ReportBuilder::new(context())
}

/// The five-case suite: pass, error, skipped, failure, pass.
fn rest_api_suite() -> Suite {
    Suite::new("Example REST API Suite")
        .with_time(0.847)
        .with_timestamp("2018-11-23T19:13:43")
        .with_case(Case::passed("test_zero_TC_T1"))
        .with_case(Case::with_result("test_one_TC_T1", ResultMarker::error()))
        .with_case(Case::with_result("test_two_TC_T1", ResultMarker::skipped()))
        .with_case(Case::with_result("test_three_TC_T1", ResultMarker::failure()))
        .with_case(Case::passed("test_four_TC_T1"))
}

// ============================================================================
// 1. Full document shape
// ============================================================================

#[test]
fn rest_api_suite_document_json() {
    let run = builder().build(&rest_api_suite()).unwrap();
    assert!(run.warnings.is_empty());

    let value = serde_json::to_value(&run.document).unwrap();
    assert_eq!(
        value,
        json!({
            "projectKey": "TC",
            "name": "Example REST API Suite",
            "status": "Done",
            "items": [{
                "testCaseKey": "TC-T1",
                "status": "Blocked",
                "environment": "REST API",
                "comment": "This is only a test. If it had been an actual emergency...",
                "userKey": "username",
                "executionTime": 0.847,
                "executionDate": "2018-11-23T19:13:43",
                "scriptResults": [
                    {"index": 0, "status": "Pass", "comment": "test_zero_TC_T1"},
                    {"index": 1, "status": "Blocked", "comment": "test_one_TC_T1"},
                    {"index": 2, "status": "Not Executed", "comment": "test_two_TC_T1"},
                    {"index": 3, "status": "Fail", "comment": "test_three_TC_T1"},
                    {"index": 4, "status": "Pass", "comment": "test_four_TC_T1"}
                ]
            }]
        })
    );
}

// ============================================================================
// 2. Pass + failure rolls up to Fail
// ============================================================================

#[test]
fn pass_and_failure_is_fail() {
    let suite = Suite::new("Two cases")
        .with_case(Case::passed("scenario_one_TC_T1"))
        .with_case(Case::with_result("scenario_two_TC_T1", ResultMarker::failure()));

    let run = builder().build(&suite).unwrap();
    let item = run.document.item().unwrap();

    assert_eq!(run.document.project_key, "TC");
    assert_eq!(item.test_case_key, "TC-T1");
    assert_eq!(item.status, Outcome::Fail);
    let statuses: Vec<Outcome> = item.script_results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Outcome::Pass, Outcome::Fail]);
}

// ============================================================================
// 3. Key mismatch skips the case and warns
// ============================================================================

#[test]
fn mismatched_key_is_skipped_with_warning() {
    let suite = Suite::new("Mixed")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::passed("test_b_TC_T2"));

    let run = builder().build(&suite).unwrap();
    let item = run.document.item().unwrap();

    assert_eq!(item.script_results.len(), 1);
    assert_eq!(item.script_results[0].comment, "test_a_TC_T1");
    assert_eq!(
        run.warnings,
        vec![ReportWarning::MultipleTestCaseKeys {
            suite: "Mixed".into(),
            case: "test_b_TC_T2".into(),
            index: 1,
            expected_key: "TC-T1".into(),
            found_key: "TC-T2".into(),
        }]
    );
}

#[test]
fn skipped_case_is_not_tallied() {
    let suite = Suite::new("Mixed")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::with_result("test_b_TC_T2", ResultMarker::error()));

    let run = builder().build(&suite).unwrap();
    assert_eq!(run.document.item().unwrap().status, Outcome::Pass);
}

#[test]
fn skipped_case_leaves_index_gap() {
    let suite = Suite::new("Mixed")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::passed("test_b_TC_T2"))
        .with_case(Case::passed("test_c_TC_T1"));

    let run = builder().build(&suite).unwrap();
    let indexes: Vec<usize> = run
        .document
        .item()
        .unwrap()
        .script_results
        .iter()
        .map(|r| r.index)
        .collect();
    assert_eq!(indexes, vec![0, 2]);
}

#[test]
fn warning_message_names_case_and_keys() {
    let suite = Suite::new("Mixed")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::passed("test_b_TC_T2"));

    let run = builder().build(&suite).unwrap();
    let message = run.warnings[0].to_string();
    assert!(message.contains("test_b_TC_T2"));
    assert!(message.contains("TC-T1"));
    assert!(message.contains("TC-T2"));
}

// ============================================================================
// 4. Unrecognized result aborts the suite
// ============================================================================

#[test]
fn unrecognized_marker_fails() {
    let suite = Suite::new("Odd")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::with_result(
            "test_b_TC_T1",
            ResultMarker::other("inconclusive"),
        ));

    let err = builder().build(&suite).unwrap_err();
    match err {
        ReportError::UnrecognizedOutcome {
            suite,
            case,
            marker,
        } => {
            assert_eq!(suite, "Odd");
            assert_eq!(case, "test_b_TC_T1");
            assert_eq!(marker, "inconclusive");
        }
        other => panic!("Expected UnrecognizedOutcome, got {:?}", other),
    }
}

#[test]
fn unrecognized_marker_fails_even_on_mismatched_key() {
    let suite = Suite::new("Odd")
        .with_case(Case::passed("test_a_TC_T1"))
        .with_case(Case::with_result("test_b_TC_T9", ResultMarker::other("flaky")));

    assert!(matches!(
        builder().build(&suite),
        Err(ReportError::UnrecognizedOutcome { .. })
    ));
}

#[test]
fn build_all_stops_at_bad_suite() {
    let good = Suite::new("Good").with_case(Case::passed("test_a_TC_T1"));
    let bad = Suite::new("Bad").with_case(Case::with_result("x_TC_T1", ResultMarker::other("?")));

    assert!(builder().build_all(&[good.clone(), bad]).is_err());
    assert_eq!(builder().build_all(&[good]).unwrap().len(), 1);
}

// ============================================================================
// 5. Edge cases
// ============================================================================

#[test]
fn empty_suite_is_not_executed_with_empty_keys() {
    let run = builder().build(&Suite::new("Empty")).unwrap();
    let item = run.document.item().unwrap();

    assert_eq!(run.document.project_key, "");
    assert_eq!(item.test_case_key, "");
    assert_eq!(item.status, Outcome::NotExecuted);
    assert!(item.script_results.is_empty());
}

#[test]
fn all_skipped_is_not_executed() {
    let suite = Suite::new("Skipped")
        .with_case(Case::with_result("a_TC_T1", ResultMarker::skipped()))
        .with_case(Case::with_result("b_TC_T1", ResultMarker::skipped()));

    let run = builder().build(&suite).unwrap();
    assert_eq!(run.document.item().unwrap().status, Outcome::NotExecuted);
}

#[test]
fn one_document_per_suite_in_order() {
    let suites = vec![
        Suite::new("First").with_case(Case::passed("a_AAA_T1")),
        Suite::new("Second").with_case(Case::passed("b_BBB_T2")),
    ];

    let runs = builder().build_all(&suites).unwrap();
    let names: Vec<&str> = runs.iter().map(|r| r.document.name.as_str()).collect();
    let projects: Vec<&str> = runs.iter().map(|r| r.document.project_key.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(projects, vec!["AAA", "BBB"]);
}

#[test]
fn context_defaults_to_empty_strings() {
    let run = ReportBuilder::new(ReporterContext::new("ad718x"))
        .build(&Suite::new("S").with_case(Case::passed("a_TC_T1")))
        .unwrap();
    let item = run.document.item().unwrap();
    assert_eq!(item.user_key, "ad718x");
    assert_eq!(item.comment, "");
    assert_eq!(item.environment, "");
}

// ============================================================================
// 6. Deterministic output
// ============================================================================

#[test]
fn building_twice_is_byte_identical() {
    let suite = rest_api_suite();
    let first = builder().build(&suite).unwrap().document.to_json().unwrap();
    let second = builder().build(&suite).unwrap().document.to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn field_order_matches_tm4j_payload() {
    let json = builder()
        .build(&Suite::new("S").with_case(Case::passed("a_TC_T1")))
        .unwrap()
        .document
        .to_json()
        .unwrap();
    let expected_prefix = concat!(
        r#"{"projectKey":"TC","name":"S","status":"Done","#,
        r#""items":[{"testCaseKey":"TC-T1","status":"Pass""#,
    );
    assert!(json.starts_with(expected_prefix));
}
