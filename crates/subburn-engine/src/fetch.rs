//! HTTP retrieval of engine artifacts and the burn font.

use std::time::Duration;

use reqwest::Client;

use subburn_core::{Blob, Error, Result};

/// Connection timeout for artifact requests. Downloads themselves are not
/// bounded; the wasm binary is tens of megabytes on a cold cache.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches remote resources into in-memory [`Blob`]s.
///
/// The orchestrator does not distinguish cache hits from network fetches;
/// any intercepting cache layer is transparent at this level.
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    client: Client,
}

impl ArtifactFetcher {
    /// Create a fetcher with a connection timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECTION_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self { client }
    }

    /// Fetch `url` and return its body tagged with `mime`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] on a transport failure or any non-success
    /// status.
    pub async fn fetch(&self, url: &str, mime: &str) -> Result<Blob> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::fetch(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::fetch(url, format!("status {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(url, format!("failed to read body: {e}")))?;

        Ok(Blob::new(bytes, mime))
    }
}

impl Default for ArtifactFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_returns_body_and_mime() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ffmpeg-core.wasm"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\0asm....".to_vec()))
            .mount(&server)
            .await;

        let fetcher = ArtifactFetcher::new();
        let url = format!("{}/ffmpeg-core.wasm", server.uri());
        let blob = fetcher.fetch(&url, "application/wasm").await.unwrap();

        assert_eq!(blob.mime, "application/wasm");
        assert_eq!(&blob.bytes[..], b"\0asm....");
    }

    #[tokio::test]
    async fn non_success_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Yahei.ttf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = ArtifactFetcher::new();
        let url = format!("{}/Yahei.ttf", server.uri());
        let err = fetcher.fetch(&url, "font/ttf").await.unwrap_err();

        match err {
            Error::Fetch { url: u, message } => {
                assert_eq!(u, url);
                assert!(message.contains("404"), "unexpected message: {message}");
            }
            other => panic!("expected Fetch error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_fetch_error() {
        let fetcher = ArtifactFetcher::new();
        // Nothing listens on this port.
        let result = fetcher
            .fetch("http://127.0.0.1:1/ffmpeg-core.js", "text/javascript")
            .await;
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }
}
