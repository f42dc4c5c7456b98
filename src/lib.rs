//! # ebi - search files across many GitHub repositories
//!
//! ebi fetches one file from every repository in a list, optionally checks it
//! for a literal term or a regular expression, and reports a result per
//! repository as text or JSON. It is handy for auditing an organization's
//! services, e.g. which Node versions their `package.json` engines pin.
//!
//! ## Quick Start
//!
//! ```bash
//! # Which repositories have a Procfile with a web process?
//! cat repos.txt | ebi contents Procfile web
//!
//! # Node engine versions, as JSON lines
//! ebi package:engines node --repo Financial-Times/ebi --json
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ebi::config::EbiConfig;
//! use ebi::github::GitHubContents;
//! use ebi::repos::{resolve, RepoListInput};
//! use ebi::search::{Ebi, SearchConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = EbiConfig::load(None)?;
//! let fetcher = Arc::new(GitHubContents::new(&config.github, std::env::var("GITHUB_TOKEN").ok()));
//! let repositories = resolve(RepoListInput {
//!     repo_list: vec!["Financial-Times/ebi".to_string()],
//!     ..Default::default()
//! });
//!
//! let search = SearchConfig::new("package.json").with_search(Some("ebi"));
//! let results = Ebi::new(fetcher).contents_search(&search, &repositories)?;
//! for result in results.get_results().await.search_matches {
//!     println!("{}", result.repository());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod github;
pub mod repos;
pub mod search;

pub use cli::Cli;
pub use config::EbiConfig;
pub use search::{Ebi, EbiResult, EbiResults, ResultsSummary, SearchConfig};

/// Result type alias for ebi operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
