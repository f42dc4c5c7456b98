//! Error taxonomy for ebi searches
//!
//! Every per-repository failure is converted into an `error` result at the
//! boundary of that repository's task, so the `Display` strings below are
//! exactly what users see in text and JSON output.

use thiserror::Error;

/// Errors raised by a [`ContentFetcher`](crate::github::ContentFetcher)
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote file does not exist (HTTP 404)
    #[error("404 ERROR: file '{filepath}' not found in '{repository}'")]
    NotFound { filepath: String, repository: String },

    /// The path resolved to a directory listing instead of a file
    #[error("Incorrect value provided for <file>; '{filepath}' is not a file path")]
    NotAFile { filepath: String },

    /// Any other non-success HTTP status
    #[error("ERROR: GitHub returned {status} for '{filepath}' in '{repository}'")]
    Http {
        status: u16,
        filepath: String,
        repository: String,
    },

    /// Transport level failure
    #[error("ERROR: request for '{filepath}' in '{repository}' failed: {message}")]
    Request {
        filepath: String,
        repository: String,
        message: String,
    },

    /// The response could not be decoded into file content
    #[error("ERROR: could not decode '{filepath}' in '{repository}': {message}")]
    Decode {
        filepath: String,
        repository: String,
        message: String,
    },
}

/// Errors raised while configuring or evaluating a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Fatal, raised before any repository is contacted
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A repository list entry that could not be parsed
    #[error("ERROR: invalid repository '{repository}' on line {line}")]
    InvalidRepository { repository: String, line: usize },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("ERROR: invalid regex '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("JSON PARSE ERROR: {filepath} parse error in '{repository}'")]
    JsonParse { filepath: String, repository: String },

    #[error("INFO: engines field not found in '{filepath}' in '{repository}'")]
    FieldNotFound { filepath: String, repository: String },
}

impl SearchError {
    /// True for errors that abort the whole search operation
    pub fn is_fatal(&self) -> bool {
        matches!(self, SearchError::Configuration(_))
    }
}
