// src/github/client.rs
// =============================================================================
// Talks to the GitHub contents API.
//
// The fetcher only knows about the `ContentsApi` trait, so tests can swap in
// an in-memory implementation and never touch the network.
//
// Rust concepts:
// - Traits: the seam between "what we ask for" and "how we get it"
// - async-trait: lets a trait have async methods usable behind &dyn
// - Send + Sync: the client is shared by every concurrent child fetch
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::contents::{contents_endpoint, ContentsResponse, GITHUB_MEDIA_TYPE};
use super::location::ResolvedLocation;
use crate::error::{FetchError, Result};

/// Reads one path of a repository from the contents API.
#[async_trait]
pub trait ContentsApi: Send + Sync {
    /// Fetches `path` (relative to the repository root) at the resolved branch.
    ///
    /// Anything but 200 OK must be reported as `FetchError::UpstreamFetch`.
    async fn get_contents(
        &self,
        location: &ResolvedLocation,
        path: &str,
        access_token: &str,
    ) -> Result<ContentsResponse>;
}

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GitHub rejects API calls without a User-Agent
    pub user_agent: String,
    pub media_type: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("source-graph/{}", env!("CARGO_PKG_VERSION")),
            media_type: GITHUB_MEDIA_TYPE.to_string(),
        }
    }
}

/// `ContentsApi` over HTTPS using reqwest.
///
/// No timeouts, retries or caching: a failed request fails the fetch.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    config: ClientConfig,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Uses a caller-built reqwest client (proxies, custom TLS...).
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ContentsApi for GithubClient {
    async fn get_contents(
        &self,
        location: &ResolvedLocation,
        path: &str,
        access_token: &str,
    ) -> Result<ContentsResponse> {
        let endpoint = contents_endpoint(location, path)?;
        debug!(%endpoint, path, branch = %location.branch, "requesting contents");

        // Build the GET with the headers GitHub expects
        let mut request = self
            .client
            .get(endpoint.clone())
            .header(ACCEPT, self.config.media_type.as_str())
            .header(USER_AGENT, self.config.user_agent.as_str());
        // Unlike a strict `token {accessToken}` on every call, an empty token
        // sends no Authorization header so public repositories can be read
        // anonymously
        if !access_token.is_empty() {
            request = request.header(AUTHORIZATION, format!("token {}", access_token));
        }

        // Only 200 counts; redirects, 404s and rate limits all end the fetch
        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            let status = response.status().as_u16();
            warn!(%endpoint, status, "contents request failed");
            return Err(FetchError::UpstreamFetch {
                status,
                url: endpoint.to_string(),
            });
        }

        // Read the whole body, then let serde decide listing vs object
        let body = response.bytes().await?;
        ContentsResponse::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use url::Url;

    // Serves exactly one canned HTTP response on a local port and hands back
    // the raw request it received
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            // Read until the blank line that ends the request headers
            let mut received = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..n]);
                if received.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;

            String::from_utf8_lossy(&received).to_string()
        });

        let api_root = Url::parse(&format!("http://{}/", addr)).unwrap();
        (api_root, handle)
    }

    // Loopback only; ignore any HTTP(S)_PROXY in the environment
    fn local_client() -> GithubClient {
        let client = Client::builder().no_proxy().build().unwrap();
        GithubClient::with_client(client, ClientConfig::default())
    }

    fn location(api_root: Url) -> ResolvedLocation {
        ResolvedLocation {
            api_root,
            owner: "octo".to_string(),
            repo: "demo".to_string(),
            path: "docs".to_string(),
            branch: "main".to_string(),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.media_type, "application/vnd.github.v3+json");
        assert!(config.user_agent.starts_with("source-graph/"));
    }

    #[tokio::test]
    async fn test_listing_request_and_headers() {
        let body = r#"[{"name": "b.md", "path": "docs/b.md"}, {"name": "a.md", "path": "docs/a.md"}]"#;
        let (api_root, server) = serve_once("200 OK", body).await;
        let client = local_client();

        let response = client
            .get_contents(&location(api_root), "docs", "secret")
            .await
            .unwrap();

        match response {
            ContentsResponse::Listing(entries) => {
                let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["b.md", "a.md"]);
            }
            other => panic!("expected listing, got {:?}", other),
        }

        // Header names arrive lowercased from hyper, so compare lowercase
        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /repos/octo/demo/contents/docs?ref=main HTTP/1.1\r\n"),
            "unexpected request line: {}",
            request
        );
        let lower = request.to_lowercase();
        assert!(lower.contains("\r\naccept: application/vnd.github.v3+json\r\n"));
        assert!(lower.contains("\r\nauthorization: token secret\r\n"));
        assert!(lower.contains("\r\nuser-agent: source-graph/"));
    }

    #[tokio::test]
    async fn test_empty_token_sends_no_authorization() {
        let (api_root, server) = serve_once("200 OK", "[]").await;
        let client = local_client();

        client
            .get_contents(&location(api_root), "", "")
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /repos/octo/demo/contents?ref=main HTTP/1.1\r\n"));
        assert!(!request.to_lowercase().contains("\r\nauthorization:"));
    }

    #[tokio::test]
    async fn test_not_found_is_upstream_error() {
        let (api_root, server) = serve_once("404 Not Found", r#"{"message": "Not Found"}"#).await;
        let client = local_client();

        let err = client
            .get_contents(&location(api_root), "docs", "secret")
            .await
            .unwrap_err();

        match err {
            FetchError::UpstreamFetch { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/repos/octo/demo/contents/docs?ref=main"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let (api_root, server) = serve_once("200 OK", "<html>not json</html>").await;
        let client = local_client();

        let err = client
            .get_contents(&location(api_root), "docs", "secret")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)), "unexpected error: {:?}", err);
        server.await.unwrap();
    }
}
