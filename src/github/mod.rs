//! Content fetching
//!
//! The core only depends on the [`ContentFetcher`] trait. [`GitHubContents`]
//! is the production implementation over the GitHub REST contents API.

use async_trait::async_trait;

use crate::repos::RepositoryId;
use crate::search::FetchError;

mod contents;

pub use contents::{DEFAULT_API_URL, GitHubContents};

/// Retrieves decoded file content for a repository
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch `filepath` from `repository`
    ///
    /// Fails with [`FetchError::NotFound`] when the file is absent and
    /// [`FetchError::NotAFile`] when the path is a directory.
    async fn fetch(&self, repository: &RepositoryId, filepath: &str) -> Result<String, FetchError>;
}
