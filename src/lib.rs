// Re-export modules
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod filter;
pub mod scoring;
pub mod server;
pub mod vitals;

// Re-export commonly used types for convenience
pub use analysis::{ContentProfile, PageSignals};
pub use scoring::{PerformanceReport, SeoAuditResult};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::{content, signals};
use crate::fetch::{HttpFetcher, PageFetcher, calculate_timeout};
use crate::filter::LinkScope;
use crate::scoring::seo;

/// Everything a one-shot audit of a page produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditOutcome {
    /// The audited URL
    pub url: String,
    /// The SEO audit result
    pub seo: SeoAuditResult,
    /// Content analysis, absent when the page could not be retrieved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentProfile>,
}

/// Builder for auditing a single page
pub struct Audit {
    url: String,
    keywords: Vec<String>,
    timeout_ms: u64,
    fetcher: Arc<dyn PageFetcher>,
}

impl Audit {
    /// Create a new Audit builder for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            keywords: Vec::new(),
            timeout_ms: 10_000, // Default fetch timeout
            fetcher: Arc::new(HttpFetcher::new()),
        }
    }

    /// Set the target keywords for content analysis
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set the base fetch timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Swap the page fetcher, e.g. for tests without network access
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Apply engine settings from a configuration
    pub fn with_config(mut self, config: &config::EngineConfig) -> Self {
        self.keywords = config.keywords.clone();
        self.timeout_ms = config.fetch_timeout_ms;
        self
    }

    /// Fetch the page and run the full audit pipeline.
    ///
    /// A failed fetch yields the fixed degenerate SEO result instead of an
    /// error; it is not retried.
    pub async fn run(self) -> AuditOutcome {
        let timeout: Duration = calculate_timeout(self.timeout_ms, self.url.len());

        let markup = match self.fetcher.fetch(&self.url, timeout).await {
            Ok(markup) => markup,
            Err(e) => {
                ::log::warn!("Audit fetch for {} failed: {}", self.url, e);
                return AuditOutcome {
                    url: self.url,
                    seo: SeoAuditResult::fetch_failure(),
                    content: None,
                };
            }
        };

        let page_signals = signals::extract(&markup);
        let profile = LinkScope::new(&self.url)
            .ok()
            .map(|scope| content::analyze(&markup, &self.keywords, &scope));

        AuditOutcome {
            url: self.url,
            seo: seo::audit_with_content(&page_signals, profile.as_ref()),
            content: profile,
        }
    }
}
