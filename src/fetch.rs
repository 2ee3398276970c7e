use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from retrieving a page for audit.
///
/// These are handled locally by the SEO engine (degenerate zero-score
/// result), never surfaced as an HTTP error to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Capability to retrieve a page's markup.
///
/// Injected so the scoring pipeline stays pure and unit-testable without
/// network access.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        ::log::debug!("Fetching {} with timeout {:?}", url, timeout);

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}

/// Scales a base timeout up for longer URLs, which tend to be more complex
/// to serve
pub fn calculate_timeout(base_ms: u64, url_length: usize) -> Duration {
    let additional_ms = (url_length / 20) as u64 * 100;
    Duration::from_millis(base_ms + additional_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_timeout() {
        assert_eq!(calculate_timeout(1000, 10), Duration::from_millis(1000));
        assert_eq!(calculate_timeout(1000, 40), Duration::from_millis(1200));
        assert_eq!(calculate_timeout(500, 100), Duration::from_millis(1000));
    }
}
