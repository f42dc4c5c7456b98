//! Configuration management for ebi
//!
//! Settings are layered with figment: embedded defaults, user config,
//! repository config, an explicit `--config` file, then `EBI_` environment
//! variables. CLI flags are applied on top by the command layer.

use serde::{Deserialize, Serialize};

mod core;

pub use self::core::DEFAULT_CONFIG;

use crate::github::DEFAULT_API_URL;

/// Main configuration structure for ebi
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EbiConfig {
    /// GitHub API access
    pub github: GitHubConfig,

    /// Search defaults
    pub search: SearchDefaults,

    /// Output defaults
    pub output: OutputDefaults,
}

/// GitHub API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Personal access token, used when neither `--token` nor
    /// `GITHUB_PERSONAL_ACCESS_TOKEN` is set
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("ebi/{}", crate::VERSION),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Maximum number of repositories to search
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    /// Print JSON lines instead of text
    pub json: bool,

    /// Report no-match results in text mode
    pub verbose: bool,
}
