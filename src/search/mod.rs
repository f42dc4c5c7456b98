//! Search pipeline
//!
//! Fetches a file from every repository concurrently, classifies each
//! repository as `match`, `no-match` or `error`, and returns the merged
//! [`EbiResults`].

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

pub mod aggregate;
pub mod engines;
pub mod error;
pub mod evaluator;
pub mod result;
pub mod types;

pub use aggregate::{EbiResults, PendingResult, ResultsSummary, Settled};
pub use engines::{EnginesOutcome, evaluate_engines};
pub use error::{FetchError, SearchError};
pub use evaluator::{Criterion, Evaluation, evaluate};
pub use result::{EbiResult, ResultBase, ResultType};
pub use types::{PACKAGE_JSON, SearchConfig};

use crate::github::ContentFetcher;
use crate::repos::{RepositoryId, ResolvedRepositories};

/// What to evaluate once the file has been fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Raw file text
    Contents,
    /// The `engines` mapping of a package manifest
    Engines,
}

/// Entry point for ebi searches
#[derive(Clone)]
pub struct Ebi {
    fetcher: Arc<dyn ContentFetcher>,
}

impl Ebi {
    pub fn new(fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Search `config.filepath` in every repository
    pub fn contents_search(
        &self,
        config: &SearchConfig,
        repositories: &ResolvedRepositories,
    ) -> Result<EbiResults, SearchError> {
        self.search(SearchMode::Contents, config, repositories)
    }

    /// Search the text of `package.json`, whatever `config.filepath` says
    pub fn package_search(
        &self,
        config: &SearchConfig,
        repositories: &ResolvedRepositories,
    ) -> Result<EbiResults, SearchError> {
        let config = SearchConfig {
            filepath: PACKAGE_JSON.to_string(),
            ..config.clone()
        };
        self.search(SearchMode::Contents, &config, repositories)
    }

    /// Search the `engines` field of `package.json`
    pub fn package_engines_search(
        &self,
        config: &SearchConfig,
        repositories: &ResolvedRepositories,
    ) -> Result<EbiResults, SearchError> {
        let config = SearchConfig {
            filepath: PACKAGE_JSON.to_string(),
            ..config.clone()
        };
        self.search(SearchMode::Engines, &config, repositories)
    }

    /// Launch one task per repository and merge them with invalid entries
    ///
    /// Only configuration errors are returned as `Err`, including a call made
    /// outside a Tokio runtime; everything else becomes an `error` result.
    pub fn search(
        &self,
        mode: SearchMode,
        config: &SearchConfig,
        repositories: &ResolvedRepositories,
    ) -> Result<EbiResults, SearchError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| {
            SearchError::Configuration("ebi searches must run inside a Tokio runtime".to_string())
        })?;

        let limit = config.limit.unwrap_or(usize::MAX);
        let shared_config = Arc::new(config.clone());

        let searches = repositories
            .repositories
            .iter()
            .take(limit)
            .map(|repository| self.spawn_search(&runtime, mode, &shared_config, repository.clone()))
            .collect();

        Ok(EbiResults::new(&repositories.errors, config, searches))
    }

    fn spawn_search(
        &self,
        runtime: &Handle,
        mode: SearchMode,
        config: &Arc<SearchConfig>,
        repository: RepositoryId,
    ) -> PendingResult {
        let base = ResultBase::new(config, repository.to_string());
        let fetcher = Arc::clone(&self.fetcher);
        let config = Arc::clone(config);

        let handle = runtime.spawn(async move {
            search_repository(fetcher.as_ref(), mode, &config, &repository).await
        });

        aggregate::pending(async move {
            match handle.await {
                Ok(settled) => settled,
                Err(join_error) => Err(EbiResult::error(
                    base,
                    format!("ERROR: search task failed: {join_error}"),
                )),
            }
        })
    }
}

/// Fetch, evaluate and classify a single repository
pub async fn search_repository(
    fetcher: &dyn ContentFetcher,
    mode: SearchMode,
    config: &SearchConfig,
    repository: &RepositoryId,
) -> Settled {
    let name = repository.to_string();
    let base = ResultBase::new(config, name.clone());

    let contents = match fetcher.fetch(repository, &config.filepath).await {
        Ok(contents) => contents,
        Err(error) => {
            debug!("{}: fetch failed: {}", name, error);
            return Err(EbiResult::error(base, SearchError::from(error)));
        }
    };

    let settled = match mode {
        SearchMode::Contents => match evaluate(&contents, config, &name) {
            Ok(Evaluation { matched: true, .. }) => Ok(EbiResult::matched(base, contents)),
            Ok(Evaluation { reason, .. }) => Ok(EbiResult::no_match(
                base,
                contents,
                reason.unwrap_or_default(),
            )),
            Err(error) => Err(EbiResult::error(base, error)),
        },
        SearchMode::Engines => match evaluate_engines(&contents, config, &name) {
            Ok(EnginesOutcome::Matched(engines)) => {
                Ok(EbiResult::matched_engines(base, contents, engines))
            }
            Ok(EnginesOutcome::NoMatch(message)) => Ok(EbiResult::no_match(base, contents, message)),
            Err(error) => Err(EbiResult::error(base, error)),
        },
    };

    debug!(
        "{}: {}",
        name,
        match &settled {
            Ok(result) | Err(result) => result.result_type(),
        }
    );
    settled
}
