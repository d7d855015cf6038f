use std::path::Path;

use tracing::info;

use crate::cli::config::{AppConfig, build_reporter_context};
use crate::error::ReportError;
use crate::feature::feature_file::{load_testcase, write_feature_file};
use crate::junit::reader::read_junit_file;
use crate::testrun::builder::{BuiltTestRun, ReportBuilder};
use crate::testrun::document::TestRunDocument;

// ============================================================================
// testrun subcommand
// ============================================================================

/// Options of the `testrun` subcommand, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TestrunArgs<'a> {
    pub xunit: &'a str,
    pub user_key: Option<&'a str>,
    pub comment: Option<&'a str>,
    pub environment: Option<&'a str>,
    pub output: Option<&'a str>,
    pub pretty: bool,
}

/// Convert an XUnit file into TM4J testrun JSON and write or print it.
///
/// Returns the number of warnings raised while building.
pub fn cmd_testrun(args: &TestrunArgs<'_>, config: &AppConfig) -> Result<usize, ReportError> {
    let context = build_reporter_context(
        &config.reporter,
        args.user_key,
        args.comment,
        args.environment,
    )?;

    let suites = read_junit_file(args.xunit)?;
    info!(path = args.xunit, suites = suites.len(), "loaded XUnit report");

    let runs = ReportBuilder::new(context).build_all(&suites)?;
    let warning_count = runs.iter().map(|run| run.warnings.len()).sum();

    let json = render_testruns(&runs, args.pretty || config.output.pretty)?;

    match args.output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|source| ReportError::Write {
                path: Path::new(path).to_path_buf(),
                source,
            })?;
            info!(path, testruns = runs.len(), "wrote testrun JSON");
        }
        None => println!("{}", json),
    }

    Ok(warning_count)
}

/// Serialize the documents of all built testruns as one JSON array.
pub fn render_testruns(runs: &[BuiltTestRun], pretty: bool) -> Result<String, ReportError> {
    let documents: Vec<&TestRunDocument> = runs.iter().map(|run| &run.document).collect();
    let rendered = if pretty {
        serde_json::to_string_pretty(&documents)
    } else {
        serde_json::to_string(&documents)
    };
    rendered.map_err(|source| ReportError::Json {
        context: "testrun documents".into(),
        source,
    })
}

// ============================================================================
// feature subcommand
// ============================================================================

/// Rebuild the `.feature` file for a TM4J test case record.
///
/// Returns `false` when the record has no BDD script.
pub fn cmd_feature(testcase_path: &str, output_dir: &str) -> Result<bool, ReportError> {
    let testcase = load_testcase(testcase_path)?;
    match write_feature_file(&testcase, output_dir)? {
        Some(path) => {
            println!("Wrote {}", path.display());
            Ok(true)
        }
        None => {
            eprintln!("Test case {} has no BDD script", testcase.key);
            Ok(false)
        }
    }
}
