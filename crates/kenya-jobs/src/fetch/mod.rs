//! Access to the remote scraping service and basic reachability checks.

mod firecrawl;
mod probe;
mod retry;

pub use firecrawl::FirecrawlClient;
pub use probe::{HttpProbe, UrlProbe, VALIDATION_TIMEOUT};
pub use retry::{fetch_with_retry, RetryPolicy};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page rendering options sent with every scrape request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
    /// Milliseconds to let dynamic content settle.
    pub wait_for: u64,
    /// Milliseconds before the service abandons the page.
    pub timeout: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            formats: owned(&["markdown", "html"]),
            include_tags: owned(&["h1", "h2", "h3", "h4", "h5", "h6", "p", "div", "span", "a"]),
            exclude_tags: owned(&["script", "style", "nav", "header", "footer"]),
            wait_for: 3000,
            timeout: 30000,
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScrapedPage {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
}

impl ScrapedPage {
    /// HTML when the service returned it, otherwise markdown.
    pub fn content(&self) -> &str {
        self.html
            .as_deref()
            .or(self.markdown.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("scraping API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("scraping API returned no page data")]
    NoData,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, FetchError>;
}
