use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReportError;

/// Scenario lines are nested this deep under `Scenario:`.
const SCENARIO_INDENT: usize = 8;

// ============================================================================
// TM4J test case record
// ============================================================================

/// The subset of a TM4J `/testcase/search` record needed to rebuild a
/// `.feature` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tm4jTestCase {
    /// Test case key, e.g. `TST-T1`
    pub key: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub test_script: Option<TestScript>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestScript {
    /// Script kind; only `BDD` scripts hold Gherkin steps. Records without
    /// a type are treated as non-BDD.
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub text: String,
}

/// A composed feature file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFile {
    pub file_name: String,
    pub contents: String,
}

// ============================================================================
// Composition
// ============================================================================

/// Compose the full `.feature` file for a BDD test case.
///
/// TM4J only stores the Gherkin steps, so the `Feature:` and `Scenario:`
/// headers are rebuilt here. Returns `None` for non-BDD test cases.
pub fn compose_feature_file(testcase: &Tm4jTestCase) -> Option<FeatureFile> {
    let script = testcase.test_script.as_ref().filter(|s| s.kind == "BDD")?;

    let scenario_text = indent_lines(&script.text, SCENARIO_INDENT);
    let header = feature_header(testcase, has_examples(&scenario_text));

    Some(FeatureFile {
        file_name: format!("{}.feature", testcase.key),
        contents: format!("{}\n{}\n", header, scenario_text),
    })
}

/// The `Feature:` block with the test case key tag and scenario title.
pub fn feature_header(testcase: &Tm4jTestCase, has_outline: bool) -> String {
    format!(
        "Feature:\n    @TestCaseKey={key}\n    Scenario{outline}: {name}\n    ",
        key = testcase.key,
        outline = if has_outline { " Outline" } else { "" },
        name = testcase.name,
    )
}

/// Whether the scenario has an `Examples:` table and so needs an outline.
pub fn has_examples(scenario_text: &str) -> bool {
    scenario_text
        .lines()
        .any(|line| line.trim().eq_ignore_ascii_case("examples:"))
}

fn indent_lines(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    format!("{}{}", pad, text.replace('\n', &format!("\n{}", pad)))
}

// ============================================================================
// Loading and writing
// ============================================================================

/// Load a TM4J test case record from a JSON file.
pub fn load_testcase(path: impl AsRef<Path>) -> Result<Tm4jTestCase, ReportError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ReportError::Json {
        context: path.display().to_string(),
        source,
    })
}

/// Compose and write the feature file into `output_dir`.
///
/// Returns the written path, or `None` if the test case has no BDD script.
pub fn write_feature_file(
    testcase: &Tm4jTestCase,
    output_dir: impl AsRef<Path>,
) -> Result<Option<PathBuf>, ReportError> {
    let Some(feature) = compose_feature_file(testcase) else {
        debug!(key = %testcase.key, "test case has no BDD script, nothing written");
        return Ok(None);
    };

    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(&feature.file_name);
    std::fs::write(&path, &feature.contents).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "wrote feature file");
    Ok(Some(path))
}
