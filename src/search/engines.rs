//! Engines evaluation over a parsed `package.json`
//!
//! Works on the `engines` mapping (or `volta` when `engines` is absent)
//! rather than the raw text, keeping entries whose name or version matches
//! the active criterion.

use serde_json::{Map, Value};

use super::error::SearchError;
use super::evaluator::{Criterion, no_match_message};
use super::types::SearchConfig;

/// Fields that may hold runtime version constraints, in lookup order
pub const ENGINE_FIELDS: [&str; 2] = ["engines", "volta"];

/// Outcome of an engines evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum EnginesOutcome {
    /// Filtered mapping, never empty
    Matched(Map<String, Value>),
    /// Nothing left after filtering; carries the no-match message
    NoMatch(String),
}

/// Parse `content` and filter its engines mapping against `config`
pub fn evaluate_engines(
    content: &str,
    config: &SearchConfig,
    repository: &str,
) -> Result<EnginesOutcome, SearchError> {
    let manifest: Value =
        serde_json::from_str(content).map_err(|_| SearchError::JsonParse {
            filepath: config.filepath.clone(),
            repository: repository.to_string(),
        })?;

    let engines = find_engines(&manifest).ok_or_else(|| SearchError::FieldNotFound {
        filepath: config.filepath.clone(),
        repository: repository.to_string(),
    })?;

    let criterion = Criterion::from_config(config)?;
    let filtered = filter_engines(engines, &criterion);

    if filtered.is_empty() {
        Ok(EnginesOutcome::NoMatch(no_match_message(
            &config.filepath,
            criterion.term(),
            repository,
        )))
    } else {
        Ok(EnginesOutcome::Matched(filtered))
    }
}

/// First engines-like object in the manifest
fn find_engines(manifest: &Value) -> Option<&Map<String, Value>> {
    ENGINE_FIELDS
        .iter()
        .find_map(|field| manifest.get(field).and_then(Value::as_object))
}

/// Union of entries whose key matches and entries whose value matches,
/// in manifest order
pub fn filter_engines(engines: &Map<String, Value>, criterion: &Criterion) -> Map<String, Value> {
    engines
        .iter()
        .filter(|(name, version)| {
            criterion.is_match(name) || criterion.is_match(&value_text(version))
        })
        .map(|(name, version)| (name.clone(), version.clone()))
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
