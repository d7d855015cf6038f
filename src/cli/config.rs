use std::path::Path;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::testrun::context::ReporterContext;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tm4j-report.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "tm4j-report",
    version,
    about = "Convert XUnit test results into TM4J testrun JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: tm4j-report.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an XUnit XML report into TM4J testrun JSON
    Testrun {
        /// XUnit XML report file
        #[arg(long)]
        xunit: String,

        /// JIRA user key of the test analyst
        #[arg(long)]
        user_key: Option<String>,

        /// Comment attached to each testrun
        #[arg(long)]
        comment: Option<String>,

        /// JIRA test environment name (must match exactly)
        #[arg(long)]
        environment: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Rebuild a .feature file from a TM4J test case JSON record
    Feature {
        /// TM4J /testcase/search record (JSON)
        #[arg(long)]
        testcase: String,

        /// Directory for the generated .feature file
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `tm4j-report.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reporter: ReporterConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
    pub user_key: Option<String>,
    pub comment: Option<String>,
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file.
///
/// A missing file yields defaults. A file that exists but does not parse is
/// an error, so a typo never silently drops the user key.
pub fn load_config(path: Option<&str>) -> Result<AppConfig, ReportError> {
    let config_path = Path::new(path.unwrap_or(DEFAULT_CONFIG_FILE));
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && path.is_none() => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ReportError::Io {
                path: config_path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ReportError::Yaml {
        path: config_path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Resolve the reporter context: CLI value, then config file, then default.
pub fn build_reporter_context(
    config: &ReporterConfig,
    user_key: Option<&str>,
    comment: Option<&str>,
    environment: Option<&str>,
) -> Result<ReporterContext, ReportError> {
    let user_key = user_key
        .or(config.user_key.as_deref())
        .ok_or(ReportError::MissingSetting("user_key"))?;
    let comment = comment.or(config.comment.as_deref()).unwrap_or_default();
    let environment = environment
        .or(config.environment.as_deref())
        .unwrap_or_default();

    Ok(ReporterContext::new(user_key)
        .with_comment(comment)
        .with_environment(environment))
}
