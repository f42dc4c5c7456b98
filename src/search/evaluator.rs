//! Search evaluation for a single repository's file content
//!
//! Exactly one matching mode is active per evaluation: the regex when one
//! is configured, otherwise the substring, otherwise "the file exists".

use regex::Regex;

use super::error::SearchError;
use super::types::SearchConfig;

/// The active matching mode derived from a [`SearchConfig`]
#[derive(Debug, Clone)]
pub enum Criterion {
    Regex(Regex),
    Substring(String),
    Exists,
}

impl Criterion {
    /// Pick the active mode; regex takes precedence over search
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if let Some(pattern) = &config.regex {
            let regex = Regex::new(pattern).map_err(|source| SearchError::Regex {
                pattern: pattern.clone(),
                source,
            })?;
            return Ok(Criterion::Regex(regex));
        }
        match &config.search {
            Some(term) => Ok(Criterion::Substring(term.clone())),
            None => Ok(Criterion::Exists),
        }
    }

    /// Case-sensitive test of `text` against the criterion
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Criterion::Regex(regex) => regex.is_match(text),
            Criterion::Substring(term) => text.contains(term.as_str()),
            Criterion::Exists => true,
        }
    }

    /// The pattern or term exactly as configured
    pub fn term(&self) -> &str {
        match self {
            Criterion::Regex(regex) => regex.as_str(),
            Criterion::Substring(term) => term,
            Criterion::Exists => "*",
        }
    }

    /// Human form used in content no-match messages: `/pattern/` or the term
    pub fn describe(&self) -> String {
        match self {
            Criterion::Regex(regex) => format!("/{}/", regex.as_str()),
            other => other.term().to_string(),
        }
    }
}

/// Outcome of evaluating content against a criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub matched: bool,
    /// Set when `matched` is false
    pub reason: Option<String>,
}

impl Evaluation {
    fn matched() -> Self {
        Self {
            matched: true,
            reason: None,
        }
    }

    fn missed(reason: String) -> Self {
        Self {
            matched: false,
            reason: Some(reason),
        }
    }
}

/// Standard no-match message
pub fn no_match_message(filepath: &str, criterion: &str, repository: &str) -> String {
    format!(
        "INFO: '{}' has no match for '{}' in '{}'",
        filepath, criterion, repository
    )
}

/// Decide whether `content` fetched from `repository` matches `config`
pub fn evaluate(
    content: &str,
    config: &SearchConfig,
    repository: &str,
) -> Result<Evaluation, SearchError> {
    let criterion = Criterion::from_config(config)?;
    if criterion.is_match(content) {
        Ok(Evaluation::matched())
    } else {
        Ok(Evaluation::missed(no_match_message(
            &config.filepath,
            &criterion.describe(),
            repository,
        )))
    }
}
