use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{FetchError, PageFetcher, ScrapeOptions, ScrapedPage};
use crate::config::FirecrawlConfig;
use crate::error::AppError;

const SCRAPE_ENDPOINT: &str = "/v1/scrape";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    #[serde(flatten)]
    options: &'a ScrapeOptions,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    data: Option<ScrapedPage>,
}

/// Firecrawl scrape API client.
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    api_url: String,
    options: ScrapeOptions,
}

impl FirecrawlClient {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_url: api_url.into(),
            options: ScrapeOptions::default(),
        })
    }

    pub fn from_config(config: &FirecrawlConfig) -> Result<Self, AppError> {
        let api_key = config.api_key()?;
        Ok(Self::new(api_key, config.api_url.as_str())?)
    }

    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    fn endpoint(&self) -> String {
        format!("{}{SCRAPE_ENDPOINT}", self.api_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for FirecrawlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirecrawlClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageFetcher for FirecrawlClient {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, FetchError> {
        let request = ScrapeRequest {
            url,
            options: &self.options,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ScrapeResponse = response.json().await?;
        match payload.data {
            Some(page) if payload.success => Ok(page),
            _ => Err(FetchError::NoData),
        }
    }
}
