//! Command implementations for the ebi CLI
//!
//! Every command resolves the repository list, runs one search operation and
//! streams the results through the [`Reporter`](crate::cli::Reporter).

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};

use crate::cli::Reporter;
use crate::config::EbiConfig;
use crate::github::GitHubContents;
use crate::repos::{self, RepoListInput};
use crate::search::{Ebi, SearchConfig, SearchMode};

pub mod contents;
pub mod engines;
pub mod package;

/// Global options shared by every command
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub token: Option<String>,
    pub limit: Option<usize>,
    pub json: bool,
    pub verbose: bool,
    pub config_path: Option<String>,
}

/// Search criterion and repository list arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// What to search for. If empty, only checks that the file exists
    #[arg(value_name = "SEARCH", conflicts_with = "regex")]
    pub search: Option<String>,

    /// Regular expression to search for instead of a literal term
    #[arg(long)]
    pub regex: Option<String>,

    /// Repositories to search, before any piped in on stdin
    #[arg(long, value_delimiter = ',', value_name = "OWNER/REPO")]
    pub repo: Vec<String>,
}

/// Resolve repositories, run the search and report every result
pub(crate) async fn run_search(
    mode: SearchMode,
    filepath: &str,
    args: SearchArgs,
    ctx: &RunContext,
) -> Result<()> {
    let config = EbiConfig::load(ctx.config_path.as_deref())?;

    let token = ctx.token.clone().or_else(|| config.github.token.clone());
    if token.is_none() {
        warn!("No GitHub token configured; requests are unauthenticated and heavily rate limited");
    }

    let limit = ctx.limit.or(config.search.limit);
    let piped = repos::read_piped_lines().await?;
    let repositories = repos::resolve(RepoListInput {
        repo_list: args.repo,
        piped,
        limit,
    });
    if repositories.is_empty() {
        warn!("No repositories given; pipe a list on stdin or pass --repo");
    }

    let search_config = SearchConfig::new(filepath)
        .with_search(args.search)
        .with_regex(args.regex)
        .with_limit(limit);

    let fetcher = Arc::new(GitHubContents::new(&config.github, token));
    let ebi = Ebi::new(fetcher);
    let results = ebi
        .search(mode, &search_config, &repositories)
        .context("Search could not be started")?;

    let reporter = Reporter::new(
        ctx.json || config.output.json,
        ctx.verbose || config.output.verbose,
    );
    let counts = reporter.report_all(&results).await;
    info!(
        "{} matches, {} without a match, {} errors",
        counts.matches, counts.no_matches, counts.errors
    );
    Ok(())
}
