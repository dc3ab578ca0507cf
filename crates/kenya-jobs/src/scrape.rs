//! Batch pipeline: validate, fetch, extract and persist job listings.

use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::ScrapeConfig;
use crate::export::{self, ExportError};
use crate::fetch::{fetch_with_retry, PageFetcher, RetryPolicy, UrlProbe};
use crate::listings::{JobListing, ListingExtractor};

pub const DEFAULT_URLS: [&str; 3] = [
    "https://www.brightermonday.co.ke",
    "https://www.fuzu.com/job",
    "https://www.myjobmag.co.ke/page/2",
];

const SAMPLE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSettings {
    pub retry: RetryPolicy,
    /// Pause after each page that produced content.
    pub rate_limit: Duration,
    pub validate_urls: bool,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            rate_limit: Duration::from_secs(2),
            validate_urls: true,
        }
    }
}

impl ScrapeSettings {
    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            retry: RetryPolicy::new(config.max_retries),
            rate_limit: config.rate_limit,
            validate_urls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source_url: String,
    pub jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub total: usize,
    /// In order of first appearance.
    pub by_source: Vec<SourceCount>,
    pub samples: Vec<JobListing>,
}

impl ScrapeSummary {
    pub fn from_jobs(jobs: &[JobListing]) -> Self {
        let mut by_source: Vec<SourceCount> = Vec::new();
        for job in jobs {
            match by_source
                .iter_mut()
                .find(|entry| entry.source_url == job.source_url)
            {
                Some(entry) => entry.jobs += 1,
                None => by_source.push(SourceCount {
                    source_url: job.source_url.clone(),
                    jobs: 1,
                }),
            }
        }

        Self {
            total: jobs.len(),
            by_source,
            samples: jobs.iter().take(SAMPLE_SIZE).cloned().collect(),
        }
    }
}

pub struct JobScraper<F, P> {
    fetcher: F,
    probe: P,
    extractor: ListingExtractor,
    settings: ScrapeSettings,
    jobs: Vec<JobListing>,
}

impl<F, P> JobScraper<F, P>
where
    F: PageFetcher,
    P: UrlProbe,
{
    pub fn new(fetcher: F, probe: P, settings: ScrapeSettings) -> Self {
        Self {
            fetcher,
            probe,
            extractor: ListingExtractor::default(),
            settings,
            jobs: Vec::new(),
        }
    }

    pub fn with_extractor(mut self, extractor: ListingExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn jobs(&self) -> &[JobListing] {
        &self.jobs
    }

    /// Scrapes each URL in turn. Failures are logged and skipped; the
    /// listings from this run replace any from an earlier one.
    pub async fn scrape_jobs<S: AsRef<str>>(&mut self, urls: &[S]) -> &[JobListing] {
        let mut all_jobs = Vec::new();

        for url in urls {
            let url = url.as_ref();
            info!(url, "processing URL");

            if self.settings.validate_urls && !self.probe.is_accessible(url).await {
                warn!(url, "URL is not accessible, skipping");
                continue;
            }

            let Some(page) = fetch_with_retry(&self.fetcher, url, &self.settings.retry).await
            else {
                error!(url, "failed to scrape");
                continue;
            };

            let content = page.content();
            if content.is_empty() {
                warn!(url, "no content extracted");
                continue;
            }

            all_jobs.extend(self.extractor.extract(content, url));

            if !self.settings.rate_limit.is_zero() {
                tokio::time::sleep(self.settings.rate_limit).await;
            }
        }

        self.jobs = all_jobs;
        info!(total = self.jobs.len(), "total jobs scraped");
        &self.jobs
    }

    pub fn summary(&self) -> ScrapeSummary {
        ScrapeSummary::from_jobs(&self.jobs)
    }

    /// Writes `kenyan_jobs_<timestamp>.csv` into `dir`.
    pub fn save_to_csv(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let now = Local::now().naive_local();
        let path = dir.join(export::default_file_name("csv", now));
        export::save_csv(&path, &self.jobs)?;
        Ok(path)
    }

    /// Writes `kenyan_jobs_<timestamp>.json` into `dir`.
    pub fn save_to_json(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let now = Local::now().naive_local();
        let path = dir.join(export::default_file_name("json", now));
        export::save_json(&path, &self.jobs, now)?;
        Ok(path)
    }
}

impl<F, P> std::fmt::Debug for JobScraper<F, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobScraper")
            .field("settings", &self.settings)
            .field("jobs", &self.jobs.len())
            .finish_non_exhaustive()
    }
}
