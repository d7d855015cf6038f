use serde::{Deserialize, Serialize};

// ============================================================================
// Parsed XUnit result tree
// ============================================================================

/// One `<testsuite>`: a named, timed group of executed test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name, becomes the testrun name
    pub name: String,

    /// Total execution time in seconds
    #[serde(default)]
    pub time: f64,

    /// Execution timestamp, copied verbatim from the XML
    #[serde(default)]
    pub timestamp: String,

    /// Test cases in document order
    #[serde(default)]
    pub cases: Vec<Case>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: 0.0,
            timestamp: String::new(),
            cases: vec![],
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }
}

/// One `<testcase>` and its result marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub name: String,

    /// `None` when the case carried no result element (it passed)
    #[serde(default)]
    pub result: Option<ResultMarker>,
}

impl Case {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: None,
        }
    }

    pub fn with_result(name: impl Into<String>, result: ResultMarker) -> Self {
        Self {
            name: name.into(),
            result: Some(result),
        }
    }
}

/// The result element nested in a `<testcase>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultMarker {
    /// `<error>`: the case could not run to completion
    Error { message: Option<String> },

    /// `<failure>`: an assertion failed
    Failure { message: Option<String> },

    /// `<skipped>`
    Skipped { message: Option<String> },

    /// Any other element name, kept for diagnostics
    Other { tag: String },
}

impl ResultMarker {
    pub fn error() -> Self {
        ResultMarker::Error { message: None }
    }

    pub fn failure() -> Self {
        ResultMarker::Failure { message: None }
    }

    pub fn skipped() -> Self {
        ResultMarker::Skipped { message: None }
    }

    pub fn other(tag: impl Into<String>) -> Self {
        ResultMarker::Other { tag: tag.into() }
    }

    /// The XML element name this marker came from.
    pub fn tag(&self) -> &str {
        match self {
            ResultMarker::Error { .. } => "error",
            ResultMarker::Failure { .. } => "failure",
            ResultMarker::Skipped { .. } => "skipped",
            ResultMarker::Other { tag } => tag,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ResultMarker::Error { message }
            | ResultMarker::Failure { message }
            | ResultMarker::Skipped { message } => message.as_deref(),
            ResultMarker::Other { .. } => None,
        }
    }
}
