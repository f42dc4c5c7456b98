//! Repository list resolution
//!
//! Turns raw repository list entries (explicit `--repo` values and piped
//! lines) into normalized `owner/name` identifiers. Malformed entries are
//! never dropped silently: each one is kept with its line number so it can
//! be reported as an `error` result.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

mod stdin;

pub use stdin::read_piped_lines;

lazy_static! {
    static ref GITHUB_REPO_REGEX: Regex = Regex::new(
        r"^(?:\S*github\.com[/:])?([\w-]+)/([\w.-]+?)(?:\.git)?(?:[/#?]\S*)?$"
    )
    .expect("repository regex is valid");
}

/// Repository string forms accepted by [`RepositoryId::parse`]
pub const SUPPORTED_REPO_PATTERNS: [&str; 8] = [
    "github-organization/github-repo-name",
    "github.com/github-organization/github-repo-name",
    "subdomain.github.com/github-organization/github-repo-name",
    "https://github.com/github-organization/github-repo-name",
    "https://github.com/github-organization/github-repo-name/blob/master",
    "https://github.com/github-organization/github-repo-name.git",
    "git+https://github.com/github-organization/github-repo-name.git",
    "git@github.com:github-organization/github-repo-name.git",
];

/// Normalized `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    /// Parse any of the [`SUPPORTED_REPO_PATTERNS`] forms
    pub fn parse(input: &str) -> Option<Self> {
        let captures = GITHUB_REPO_REGEX.captures(input.trim())?;
        Some(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "could not extract owner and repo from '{}', expected one of:\n- {}",
                s,
                SUPPORTED_REPO_PATTERNS.join("\n- ")
            )
        })
    }
}

/// A malformed repository list entry and its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidEntry {
    pub repository: String,
    pub line: usize,
}

/// Raw repository list sources
#[derive(Debug, Clone, Default)]
pub struct RepoListInput {
    /// Explicit list, placed before piped lines
    pub repo_list: Vec<String>,
    /// Lines read from a pipe, if any
    pub piped: Vec<String>,
    /// Cap on the number of valid repositories; zero means unlimited
    pub limit: Option<usize>,
}

/// Resolver output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRepositories {
    pub repositories: Vec<RepositoryId>,
    pub errors: Vec<InvalidEntry>,
}

impl ResolvedRepositories {
    /// Number of entries that will produce a result
    pub fn len(&self) -> usize {
        self.repositories.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Validate and normalize repository list entries
///
/// Explicit entries come first, then piped lines; line numbers count every
/// entry of that concatenation, blank ones included. Blank entries are
/// skipped. The limit applies to valid repositories only.
pub fn resolve(input: RepoListInput) -> ResolvedRepositories {
    let mut resolved = ResolvedRepositories::default();

    let entries = input.repo_list.iter().chain(input.piped.iter());
    for (index, raw) in entries.enumerate() {
        let entry = raw.trim();
        if entry.is_empty() {
            continue;
        }
        match RepositoryId::parse(entry) {
            Some(repository) => resolved.repositories.push(repository),
            None => resolved.errors.push(InvalidEntry {
                repository: entry.to_string(),
                line: index + 1,
            }),
        }
    }

    if let Some(limit) = input.limit.filter(|l| *l > 0) {
        resolved.repositories.truncate(limit);
    }

    tracing::debug!(
        "resolved {} repositories, {} invalid entries",
        resolved.repositories.len(),
        resolved.errors.len()
    );
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piped(lines: &str) -> RepoListInput {
        RepoListInput {
            piped: lines.split('\n').map(String::from).collect(),
            ..Default::default()
        }
    }

    fn names(resolved: &ResolvedRepositories) -> Vec<String> {
        resolved.repositories.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_supported_patterns_parse() {
        for pattern in SUPPORTED_REPO_PATTERNS {
            let repository = RepositoryId::parse(pattern)
                .unwrap_or_else(|| panic!("should parse {pattern}"));
            assert_eq!(repository.owner, "github-organization");
            assert_eq!(repository.name, "github-repo-name");
        }
    }

    #[test]
    fn test_unsupported_patterns_are_rejected() {
        for input in [
            "https://github.com/github-organization",
            "this is junk subdomain.github.com/github-organization/github-repo-name",
            "this is absolute/rubbish that we will not support",
            "something",
            "/",
            "something/",
            "/something",
            "/something/something",
        ] {
            assert_eq!(RepositoryId::parse(input), None, "should reject {input}");
        }
    }

    #[test]
    fn test_repository_names_keep_dots() {
        let repository: RepositoryId = "Financial-Times/next.front-page".parse().unwrap();
        assert_eq!(repository.to_string(), "Financial-Times/next.front-page");
    }

    #[test]
    fn test_from_str_lists_supported_patterns() {
        let error = "nope".parse::<RepositoryId>().unwrap_err();
        assert!(error.contains("could not extract owner and repo"));
        assert!(error.contains("git@github.com:"));
    }

    #[test]
    fn test_empty_input() {
        for input in ["", "\n"] {
            let resolved = resolve(piped(input));
            assert!(resolved.repositories.is_empty());
            assert!(resolved.errors.is_empty());
        }
        assert!(resolve(RepoListInput::default()).is_empty());
    }

    #[test]
    fn test_normalizes_urls() {
        let resolved = resolve(piped("https://github.com/Financial-Times/something.git"));
        assert_eq!(names(&resolved), vec!["Financial-Times/something"]);
    }

    #[test]
    fn test_invalid_entries_keep_line_numbers() {
        let resolved = resolve(piped("owner/good1\nbad-one\n\nowner/good2\nbad-two"));
        assert_eq!(names(&resolved), vec!["owner/good1", "owner/good2"]);
        assert_eq!(
            resolved.errors,
            vec![
                InvalidEntry { repository: "bad-one".to_string(), line: 2 },
                InvalidEntry { repository: "bad-two".to_string(), line: 5 },
            ]
        );
        assert_eq!(resolved.len(), 4);
    }

    #[test]
    fn test_explicit_list_comes_before_piped_lines() {
        let input = RepoListInput {
            repo_list: vec!["owner/explicit".to_string(), "bad".to_string()],
            piped: vec!["owner/piped".to_string(), "worse".to_string()],
            limit: None,
        };
        let resolved = resolve(input);
        assert_eq!(names(&resolved), vec!["owner/explicit", "owner/piped"]);
        let lines: Vec<usize> = resolved.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_limit_truncates_valid_repositories() {
        let mut input = piped("owner/a\nbad\nowner/b\nowner/c");
        input.limit = Some(2);
        let resolved = resolve(input);
        assert_eq!(names(&resolved), vec!["owner/a", "owner/b"]);
        assert_eq!(resolved.errors.len(), 1);

        let mut unlimited = piped("owner/a\nowner/b");
        unlimited.limit = Some(0);
        assert_eq!(resolve(unlimited).repositories.len(), 2);
    }
}
