//! The loader contract and the HTTP implementation.

use std::future::Future;
use std::time::Duration;

use url::Url;

use super::error::LoadError;

/// Request timeout for fragment fetches. A hanging resource resolves to a
/// transport failure instead of parking its slot in `Pending` forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches one fragment resource and resolves it to raw content or a
/// failure.
///
/// Each call is independent; no ordering is implied between concurrent
/// loads of different resources. Implementations must not touch the render
/// tree - placement is the composer's job.
pub trait FragmentLoader: Send + Sync {
    /// Resolve `locator` to the fragment's raw content, unparsed.
    fn load(&self, locator: &str) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// HTTP-backed loader. Relative locators are joined against the page's base
/// URL.
pub struct HttpLoader {
    client: reqwest::Client,
    base: Url,
}

impl HttpLoader {
    /// Create a loader with a default client.
    pub fn new(base: Url) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, base }
    }

    /// Create a loader sharing an existing client.
    pub fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }
}

impl FragmentLoader for HttpLoader {
    async fn load(&self, locator: &str) -> Result<String, LoadError> {
        let target = self
            .base
            .join(locator)
            .map_err(|e| LoadError::transport(locator, e))?;

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| LoadError::transport(locator, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                locator: locator.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::transport(locator, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_http::{Response, Server};

    /// Serve exactly one request on an ephemeral port.
    fn serve_one(body: &'static str, status: u16) -> (Url, std::thread::JoinHandle<()>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let handle = std::thread::spawn(move || {
            if let Ok(Some(request)) = server.recv_timeout(Duration::from_secs(5)) {
                let response = Response::from_string(body).with_status_code(status);
                request.respond(response).ok();
            }
        });
        (base, handle)
    }

    #[tokio::test]
    async fn test_success_returns_raw_content() {
        let (base, server) = serve_one(r#"<header id="main-header"></header>"#, 200);
        let loader = HttpLoader::new(base);

        let content = loader.load("_header.html").await.unwrap();
        assert_eq!(content, r#"<header id="main-header"></header>"#);
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_status_error() {
        let (base, server) = serve_one("not found", 404);
        let loader = HttpLoader::new(base);

        let err = loader.load("_missing.html").await.unwrap_err();
        match err {
            LoadError::Status { locator, status } => {
                assert_eq!(locator, "_missing.html");
                assert_eq!(status, 404);
            }
            other => panic!("expected status error, got {other:?}"),
        }
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_transport_error() {
        // Grab a free port, then close the listener before connecting.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let loader = HttpLoader::new(base);

        let err = loader.load("_header.html").await.unwrap_err();
        assert!(matches!(err, LoadError::Transport { .. }));
        assert_eq!(err.locator(), "_header.html");
    }

    #[test]
    fn test_relative_locators_join_against_the_page_base() {
        let base = Url::parse("http://example.org/docs/").unwrap();
        assert_eq!(
            base.join("_header.html").unwrap().as_str(),
            "http://example.org/docs/_header.html"
        );
    }
}
