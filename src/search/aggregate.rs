//! Ebi result aggregation
//!
//! One list of pending per-repository results is the single source of
//! truth. Callers either consume it entry by entry as each settles, or ask
//! for a categorized summary computed from it on demand.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared, join_all};
use futures::stream::FuturesUnordered;
use serde::Serialize;

use super::error::SearchError;
use super::result::{EbiResult, ResultBase, ResultType};
use super::types::SearchConfig;
use crate::repos::InvalidEntry;

/// A settled entry: `Ok` resolves with any result type, `Err` always carries
/// an `error` result
pub type Settled = Result<EbiResult, EbiResult>;

/// A pending entry; cloning it shares the same underlying task
pub type PendingResult = Shared<BoxFuture<'static, Settled>>;

/// Wrap a future as a shareable pending result
pub fn pending<F>(future: F) -> PendingResult
where
    F: Future<Output = Settled> + Send + 'static,
{
    future.boxed().shared()
}

/// An already failed entry for a malformed repository list line
pub fn invalid_entry_result(entry: &InvalidEntry, config: &SearchConfig) -> PendingResult {
    let base = ResultBase::new(config, entry.repository.clone());
    let error = SearchError::InvalidRepository {
        repository: entry.repository.clone(),
        line: entry.line,
    };
    pending(futures::future::ready(Err(EbiResult::error(base, error))))
}

/// Settled results grouped by outcome kind
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    /// Every result, in input order
    pub all_results: Vec<EbiResult>,
    pub search_matches: Vec<EbiResult>,
    pub search_no_matches: Vec<EbiResult>,
    pub search_errors: Vec<EbiResult>,
}

impl ResultsSummary {
    fn from_results(all_results: Vec<EbiResult>) -> Self {
        let of_type = |kind: ResultType| -> Vec<EbiResult> {
            all_results
                .iter()
                .filter(|r| r.result_type() == kind)
                .cloned()
                .collect()
        };
        Self {
            search_matches: of_type(ResultType::Match),
            search_no_matches: of_type(ResultType::NoMatch),
            search_errors: of_type(ResultType::Error),
            all_results,
        }
    }
}

/// Results of one search operation
pub struct EbiResults {
    /// One entry per reported line: invalid entries first, in line order,
    /// then repositories in list order
    pub results_async: Vec<PendingResult>,
}

impl EbiResults {
    /// Merge invalid list entries with in-flight repository searches
    pub fn new(
        errors: &[InvalidEntry],
        config: &SearchConfig,
        search_results: Vec<PendingResult>,
    ) -> Self {
        let results_async = errors
            .iter()
            .map(|entry| invalid_entry_result(entry, config))
            .chain(search_results)
            .collect();
        Self { results_async }
    }

    pub fn len(&self) -> usize {
        self.results_async.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results_async.is_empty()
    }

    /// Wait for every entry and group the results
    ///
    /// Never fails: rejected entries are folded in as `error` results. Each
    /// call waits again and regroups from scratch.
    pub async fn get_results(&self) -> ResultsSummary {
        let settled = join_all(self.results_async.iter().cloned()).await;
        let all_results = settled
            .into_iter()
            .map(|entry| entry.unwrap_or_else(|error| error))
            .collect();
        ResultsSummary::from_results(all_results)
    }

    /// Entries in the order they settle, for progressive output
    pub fn settled_in_completion_order(&self) -> FuturesUnordered<PendingResult> {
        self.results_async.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    fn config() -> SearchConfig {
        SearchConfig::new("Procfile").with_search(Some("web"))
    }

    fn base(repository: &str) -> ResultBase {
        ResultBase::new(&config(), repository)
    }

    fn delayed(ms: u64, settled: Settled) -> PendingResult {
        pending(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            settled
        })
    }

    fn sample() -> EbiResults {
        let errors = vec![
            InvalidEntry { repository: "bad-one".to_string(), line: 2 },
            InvalidEntry { repository: "bad-two".to_string(), line: 4 },
        ];
        let searches = vec![
            delayed(30, Ok(EbiResult::matched(base("owner/a"), "web: node"))),
            delayed(0, Ok(EbiResult::no_match(base("owner/b"), "worker", "INFO: no"))),
            delayed(10, Err(EbiResult::error(base("owner/c"), "404 ERROR: gone"))),
        ];
        EbiResults::new(&errors, &config(), searches)
    }

    #[tokio::test]
    async fn test_invalid_entries_come_first_and_reject() {
        let results = sample();
        assert_eq!(results.len(), 5);

        let first = results.results_async[0].clone().await.unwrap_err();
        assert_eq!(first.repository(), "bad-one");
        match first {
            EbiResult::Error(e) => {
                assert_eq!(e.error, "ERROR: invalid repository 'bad-one' on line 2");
                assert_eq!(e.base.filepath, "Procfile");
                assert_eq!(e.base.search.as_deref(), Some("web"));
            }
            other => panic!("expected error, got {other:?}"),
        }
        let second = results.results_async[1].clone().await.unwrap_err();
        assert!(second.is_error());
        assert_eq!(second.repository(), "bad-two");
    }

    #[tokio::test]
    async fn test_get_results_groups_in_input_order() {
        let summary = sample().get_results().await;
        let order: Vec<&str> = summary.all_results.iter().map(|r| r.repository()).collect();
        assert_eq!(order, vec!["bad-one", "bad-two", "owner/a", "owner/b", "owner/c"]);
        assert_eq!(summary.search_matches.len(), 1);
        assert_eq!(summary.search_no_matches.len(), 1);
        assert_eq!(summary.search_errors.len(), 3);
        assert_eq!(
            summary.search_matches.len() + summary.search_no_matches.len() + summary.search_errors.len(),
            summary.all_results.len()
        );
    }

    #[tokio::test]
    async fn test_get_results_is_repeatable() {
        let results = sample();
        let first = results.get_results().await;
        let second = results.get_results().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_completion_order_stream_yields_every_entry() {
        let results = sample();
        let settled: Vec<Settled> = results.settled_in_completion_order().collect().await;
        assert_eq!(settled.len(), 5);
        let last = settled.last().unwrap().as_ref().unwrap();
        assert_eq!(last.repository(), "owner/a");
    }

    #[tokio::test]
    async fn test_empty_results() {
        let results = EbiResults::new(&[], &config(), Vec::new());
        assert!(results.is_empty());
        assert_eq!(results.get_results().await, ResultsSummary::default());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let value = serde_json::to_value(ResultsSummary::default()).unwrap();
        for key in ["allResults", "searchMatches", "searchNoMatches", "searchErrors"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
