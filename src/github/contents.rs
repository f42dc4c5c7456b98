//! GitHub contents API client

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Response, StatusCode, Url, header};
use serde::Deserialize;
use tracing::debug;

use super::ContentFetcher;
use crate::config::GitHubConfig;
use crate::repos::RepositoryId;
use crate::search::FetchError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT: &str = "application/vnd.github.v3+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw";

/// Single entry returned by the contents endpoint for a file path
#[derive(Debug, Deserialize)]
struct ContentEntry {
    #[serde(default)]
    path: String,
    #[serde(default)]
    content: Option<String>,
    /// `base64` for inline content, `none` for files over 1 MB
    #[serde(default)]
    encoding: Option<String>,
}

/// Directory listings come back as arrays
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Directory(Vec<serde_json::Value>),
    File(ContentEntry),
}

/// Fetches files through `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Clone)]
pub struct GitHubContents {
    client: Client,
    api_url: String,
    user_agent: String,
    token: Option<String>,
}

impl GitHubContents {
    pub fn new(config: &GitHubConfig, token: Option<String>) -> Self {
        Self::with_client(Client::new(), config, token)
    }

    pub fn with_client(client: Client, config: &GitHubConfig, token: Option<String>) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Contents endpoint URL with every path segment percent-encoded
    fn contents_url(&self, repository: &RepositoryId, filepath: &str) -> Result<Url, String> {
        let mut url = Url::parse(&self.api_url).map_err(|e| e.to_string())?;
        url.path_segments_mut()
            .map_err(|_| format!("'{}' cannot be used as an API base URL", self.api_url))?
            .pop_if_empty()
            .extend(["repos", repository.owner.as_str(), repository.name.as_str(), "contents"])
            .extend(filepath.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// Send a GET with the given media type, mapping failure statuses
    async fn get(
        &self,
        url: Url,
        accept: &str,
        repository: &RepositoryId,
        filepath: &str,
    ) -> Result<Response, FetchError> {
        debug!("GET {} ({})", url, accept);

        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, accept)
            .header(header::USER_AGENT, &self.user_agent);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().await.map_err(|e| FetchError::Request {
            filepath: filepath.to_string(),
            repository: repository.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                filepath: filepath.to_string(),
                repository: repository.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                filepath: filepath.to_string(),
                repository: repository.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ContentFetcher for GitHubContents {
    async fn fetch(&self, repository: &RepositoryId, filepath: &str) -> Result<String, FetchError> {
        let decode_error = |message: String| FetchError::Decode {
            filepath: filepath.to_string(),
            repository: repository.to_string(),
            message,
        };
        let url = self
            .contents_url(repository, filepath)
            .map_err(|message| FetchError::Request {
                filepath: filepath.to_string(),
                repository: repository.to_string(),
                message,
            })?;

        let response = self.get(url.clone(), ACCEPT, repository, filepath).await?;
        let body: ContentsResponse = response
            .json()
            .await
            .map_err(|e| decode_error(e.to_string()))?;

        let entry = match body {
            ContentsResponse::File(entry) if entry.path == filepath.trim_matches('/') => entry,
            _ => {
                return Err(FetchError::NotAFile {
                    filepath: filepath.to_string(),
                });
            }
        };

        match entry.encoding.as_deref() {
            None | Some("base64") => {
                decode_content(entry.content.as_deref().unwrap_or_default()).map_err(decode_error)
            }
            Some(encoding) => {
                // Large files are not inlined; ask for the raw bytes instead
                debug!("{}: '{}' has {} encoding, fetching raw", repository, filepath, encoding);
                let response = self.get(url, ACCEPT_RAW, repository, filepath).await?;
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| decode_error(e.to_string()))?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

/// GitHub wraps base64 content at 60 columns
fn decode_content(encoded: &str) -> Result<String, String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|e| e.to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo() -> RepositoryId {
        "Financial-Times/next-front-page".parse().unwrap()
    }

    fn fetcher(server: &MockServer, token: Option<&str>) -> GitHubContents {
        let config = GitHubConfig {
            api_url: server.uri(),
            ..GitHubConfig::default()
        };
        let client = Client::builder().no_proxy().build().unwrap();
        GitHubContents::with_client(client, &config, token.map(String::from))
    }

    #[test]
    fn test_decode_content_ignores_line_wrapping() {
        let encoded = STANDARD.encode("web: n-cluster server/init.js");
        let (head, tail) = encoded.split_at(10);
        assert_eq!(
            decode_content(&format!("{head}\n{tail}\n")).unwrap(),
            "web: n-cluster server/init.js"
        );
    }

    #[tokio::test]
    async fn test_fetch_decodes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/Financial-Times/next-front-page/contents/Procfile"))
            .and(header("authorization", "token 123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "Procfile",
                "content": STANDARD.encode("web: n-cluster server/init.js"),
            })))
            .mount(&server)
            .await;

        let contents = fetcher(&server, Some("123")).fetch(&repo(), "Procfile").await.unwrap();
        assert!(contents.contains("web: n-cluster"));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let error = fetcher(&server, None).fetch(&repo(), "package.json").await.unwrap_err();
        assert!(matches!(error, FetchError::NotFound { .. }));
        assert_eq!(
            error.to_string(),
            "404 ERROR: file 'package.json' not found in 'Financial-Times/next-front-page'"
        );
    }

    #[tokio::test]
    async fn test_fetch_directory_is_not_a_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"path": "app.js"}, {"path": "libs"}])),
            )
            .mount(&server)
            .await;

        let error = fetcher(&server, None).fetch(&repo(), "server").await.unwrap_err();
        assert!(matches!(error, FetchError::NotAFile { .. }));
        assert!(error.to_string().contains("Incorrect value provided for <file>"));
    }

    #[tokio::test]
    async fn test_fetch_path_mismatch_is_not_a_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "server/index.js",
                "content": STANDARD.encode("x"),
            })))
            .mount(&server)
            .await;

        let error = fetcher(&server, None).fetch(&repo(), "server").await.unwrap_err();
        assert!(matches!(error, FetchError::NotAFile { .. }));
    }

    #[tokio::test]
    async fn test_fetch_large_file_falls_back_to_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/Financial-Times/next-front-page/contents/big.json"))
            .and(header("accept", ACCEPT_RAW))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"big"}"#))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/Financial-Times/next-front-page/contents/big.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "big.json",
                "content": "",
                "encoding": "none",
            })))
            .mount(&server)
            .await;

        let contents = fetcher(&server, None).fetch(&repo(), "big.json").await.unwrap();
        assert_eq!(contents, r#"{"name":"big"}"#);
    }

    #[tokio::test]
    async fn test_fetch_large_file_raw_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("accept", ACCEPT_RAW))
            .respond_with(ResponseTemplate::new(403))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "big.json",
                "content": "",
                "encoding": "none",
            })))
            .mount(&server)
            .await;

        let error = fetcher(&server, None).fetch(&repo(), "big.json").await.unwrap_err();
        assert!(matches!(error, FetchError::Http { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_fetch_encodes_path_segments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/Financial-Times/next-front-page/contents/docs/%23notes.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "file",
                "path": "docs/#notes.md",
                "content": STANDARD.encode("# Notes"),
            })))
            .mount(&server)
            .await;

        let contents = fetcher(&server, None).fetch(&repo(), "docs/#notes.md").await.unwrap();
        assert_eq!(contents, "# Notes");
    }

    #[test]
    fn test_contents_url_keeps_api_prefix() {
        let config = GitHubConfig {
            api_url: "https://github.example.com/api/v3/".to_string(),
            ..GitHubConfig::default()
        };
        let url = GitHubContents::new(&config, None)
            .contents_url(&repo(), "/server/app?.js")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://github.example.com/api/v3/repos/Financial-Times/next-front-page/contents/server/app%3F.js"
        );
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let error = fetcher(&server, None).fetch(&repo(), "Procfile").await.unwrap_err();
        assert!(matches!(error, FetchError::Http { status: 502, .. }));
    }
}
