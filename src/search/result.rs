//! Ebi result algebra
//!
//! A result is one of a closed set of outcomes. Every variant carries the
//! originating search configuration and repository, plus only the fields
//! that belong to that outcome. Results are plain values: built once,
//! never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::SearchConfig;

/// Outcome kind of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultType {
    Match,
    NoMatch,
    Error,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultType::Match => "match",
            ResultType::NoMatch => "no-match",
            ResultType::Error => "error",
        };
        f.write_str(name)
    }
}

/// Fields shared by every result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBase {
    pub repository: String,
    pub filepath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl ResultBase {
    pub fn new(config: &SearchConfig, repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            filepath: config.filepath.clone(),
            search: config.search.clone(),
            regex: config.regex.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    pub base: ResultBase,
    pub file_contents: String,
    /// Filtered `engines` mapping for engines searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<Map<String, Value>>,
    /// Extra text printed after the repository in text mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoMatchResult {
    #[serde(flatten)]
    pub base: ResultBase,
    pub file_contents: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    #[serde(flatten)]
    pub base: ResultBase,
    pub error: String,
}

/// A single per-repository search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EbiResult {
    Match(MatchResult),
    NoMatch(NoMatchResult),
    Error(ErrorResult),
}

impl EbiResult {
    /// Plain match carrying the fetched file
    pub fn matched(base: ResultBase, file_contents: impl Into<String>) -> Self {
        EbiResult::Match(MatchResult {
            base,
            file_contents: file_contents.into(),
            engines: None,
            text_suffix: None,
        })
    }

    /// Match on the `engines` mapping, reported as `name@version` pairs
    pub fn matched_engines(
        base: ResultBase,
        file_contents: impl Into<String>,
        engines: Map<String, Value>,
    ) -> Self {
        let text_suffix = engines_report(&engines);
        EbiResult::Match(MatchResult {
            base,
            file_contents: file_contents.into(),
            engines: Some(engines),
            text_suffix: Some(text_suffix),
        })
    }

    pub fn no_match(
        base: ResultBase,
        file_contents: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        EbiResult::NoMatch(NoMatchResult {
            base,
            file_contents: file_contents.into(),
            message: message.into(),
        })
    }

    pub fn error(base: ResultBase, error: impl fmt::Display) -> Self {
        EbiResult::Error(ErrorResult {
            base,
            error: error.to_string(),
        })
    }

    pub fn result_type(&self) -> ResultType {
        match self {
            EbiResult::Match(_) => ResultType::Match,
            EbiResult::NoMatch(_) => ResultType::NoMatch,
            EbiResult::Error(_) => ResultType::Error,
        }
    }

    pub fn base(&self) -> &ResultBase {
        match self {
            EbiResult::Match(r) => &r.base,
            EbiResult::NoMatch(r) => &r.base,
            EbiResult::Error(r) => &r.base,
        }
    }

    pub fn repository(&self) -> &str {
        &self.base().repository
    }

    pub fn filepath(&self) -> &str {
        &self.base().filepath
    }

    /// Fetched content; absent on errors
    pub fn file_contents(&self) -> Option<&str> {
        match self {
            EbiResult::Match(r) => Some(&r.file_contents),
            EbiResult::NoMatch(r) => Some(&r.file_contents),
            EbiResult::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EbiResult::Error(_))
    }
}

/// Tab separated engines report, e.g. `node@8.13.0\tnpm@6.8.0`
pub fn engines_report(engines: &Map<String, Value>) -> String {
    engines
        .iter()
        .map(|(name, version)| match version {
            Value::String(v) => format!("{name}@{v}"),
            other => format!("{name}@{other}"),
        })
        .collect::<Vec<_>>()
        .join("\t")
}
