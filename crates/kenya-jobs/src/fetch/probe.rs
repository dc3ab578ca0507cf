use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use super::FetchError;

pub const VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Decides whether a job board is worth sending to the scraping service.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn is_accessible(&self, url: &str) -> bool;
}

/// `HEAD` request probe; only a final `200 OK` counts as accessible.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn is_accessible(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!(url, error = %err, "probe request failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_urls_are_not_accessible() {
        let probe = HttpProbe::new(Duration::from_millis(200)).expect("probe builds");
        assert!(!probe.is_accessible("not a url").await);
    }
}
