use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A test case carried a result marker that maps to no TM4J status
    #[error("test case '{case}' in suite '{suite}' has unrecognized result '{marker}'")]
    UnrecognizedOutcome {
        suite: String,
        case: String,
        marker: String,
    },

    /// Reading an input file failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing an output file failed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// XUnit document is not well-formed XML
    #[error("malformed XUnit XML ({context}): {source}")]
    Xml {
        context: String,
        source: quick_xml::Error,
    },

    /// Required XML attribute is absent
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// XML attribute value could not be parsed
    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// XUnit document has neither <testsuites> nor <testsuite> at its root
    #[error("no <testsuites> or <testsuite> root element found")]
    NoSuites,

    /// JSON (de)serialization failed
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file is malformed
    #[error("invalid config file {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A required setting was given neither on the command line nor in the config file
    #[error("missing setting '{0}' (pass it as a flag or set it in the config file)")]
    MissingSetting(&'static str),
}
