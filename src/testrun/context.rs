use serde::{Deserialize, Serialize};

/// Who ran the tests and where. Copied into every testrun item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReporterContext {
    /// JIRA user key of the test analyst
    pub user_key: String,

    /// Free-form comment attached to each testrun item
    #[serde(default)]
    pub comment: String,

    /// JIRA test environment name
    #[serde(default)]
    pub environment: String,
}

impl ReporterContext {
    pub fn new(user_key: impl Into<String>) -> Self {
        Self {
            user_key: user_key.into(),
            comment: String::new(),
            environment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }
}
