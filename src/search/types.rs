//! Search configuration shared by every search operation

use serde::{Deserialize, Serialize};

use super::error::SearchError;

/// File that `package` and `package:engines` searches look at
pub const PACKAGE_JSON: &str = "package.json";

/// Immutable per-invocation search configuration
///
/// `regex` and `search` may both be present; `regex` always decides the
/// outcome and `search` is then only carried on results as metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub filepath: String,
    pub search: Option<String>,
    pub regex: Option<String>,
    pub limit: Option<usize>,
}

impl SearchConfig {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            ..Default::default()
        }
    }

    /// Substring criterion; empty strings mean "no search"
    pub fn with_search(mut self, search: Option<impl Into<String>>) -> Self {
        self.search = search.map(Into::<String>::into).filter(|s| !s.is_empty());
        self
    }

    /// Regex criterion; empty strings mean "no regex"
    pub fn with_regex(mut self, regex: Option<impl Into<String>>) -> Self {
        self.regex = regex.map(Into::<String>::into).filter(|r| !r.is_empty());
        self
    }

    /// Repository cap; zero means unlimited
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|l| *l > 0);
        self
    }

    /// Fail fast on contract violations, before any repository is contacted
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.filepath.trim().is_empty() {
            return Err(SearchError::Configuration(
                "a non-empty `filepath` is required".to_string(),
            ));
        }
        Ok(())
    }
}
