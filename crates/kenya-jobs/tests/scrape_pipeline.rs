use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use kenya_jobs::export::read_json;
use kenya_jobs::fetch::{FetchError, PageFetcher, RetryPolicy, ScrapedPage, UrlProbe};
use kenya_jobs::scrape::{JobScraper, ScrapeSettings, SourceCount};

struct StubFetcher {
    pages: HashMap<String, ScrapedPage>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    fn new(pages: &[(&str, ScrapedPage)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, page)| (url.to_string(), page.clone()))
                .collect(),
            calls: Arc::default(),
        }
    }

    fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage, FetchError> {
        self.calls.lock().expect("calls mutex").push(url.to_string());
        self.pages.get(url).cloned().ok_or(FetchError::Api {
            status: 500,
            body: "upstream failure".to_string(),
        })
    }
}

struct StubProbe {
    unreachable: Vec<&'static str>,
}

#[async_trait]
impl UrlProbe for StubProbe {
    async fn is_accessible(&self, url: &str) -> bool {
        !self.unreachable.iter().any(|blocked| *blocked == url)
    }
}

fn html(content: &str) -> ScrapedPage {
    ScrapedPage {
        html: Some(content.to_string()),
        markdown: None,
    }
}

fn fast_settings() -> ScrapeSettings {
    ScrapeSettings {
        retry: RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::ZERO,
        },
        rate_limit: Duration::ZERO,
        validate_urls: true,
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kenya-jobs-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("scratch dir created");
    dir
}

const FUZU: &str = "https://www.fuzu.com/job";
const MYJOBMAG: &str = "https://www.myjobmag.co.ke/page/2";
const BROKEN: &str = "https://broken.example.com";
const OFFLINE: &str = "https://offline.example.com";
const EMPTY: &str = "https://empty.example.com";

fn recorded(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().expect("calls mutex").clone()
}

fn scraper() -> JobScraper<StubFetcher, StubProbe> {
    scraper_with_log().0
}

fn scraper_with_log() -> (JobScraper<StubFetcher, StubProbe>, Arc<Mutex<Vec<String>>>) {
    let fetcher = StubFetcher::new(&[
        (
            FUZU,
            html("<h2>Accountant Job</h2><h2>Sales Role</h2>"),
        ),
        (
            MYJOBMAG,
            html("<article><h3>Nurse</h3></article>"),
        ),
        (OFFLINE, html("<h2>Offline Job</h2>")),
        (EMPTY, ScrapedPage::default()),
    ]);
    let probe = StubProbe {
        unreachable: vec![OFFLINE],
    };
    let log = fetcher.call_log();
    (JobScraper::new(fetcher, probe, fast_settings()), log)
}

#[tokio::test]
async fn failing_sources_are_skipped_and_the_rest_collected() {
    let mut scraper = scraper();
    let jobs = scraper
        .scrape_jobs(&[FUZU, OFFLINE, BROKEN, EMPTY, MYJOBMAG])
        .await;

    let titles: Vec<_> = jobs.iter().map(|job| job.job_title.clone()).collect();
    assert_eq!(titles, vec!["Accountant Job", "Sales Role", "Nurse"]);

    let summary = scraper.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(
        summary.by_source,
        vec![
            SourceCount {
                source_url: FUZU.to_string(),
                jobs: 2
            },
            SourceCount {
                source_url: "https://www.myjobmag.co.ke".to_string(),
                jobs: 1
            },
        ]
    );
    assert_eq!(summary.samples.len(), 3);
}

#[tokio::test]
async fn unreachable_urls_are_never_fetched_and_errors_are_retried() {
    let (mut scraper, log) = scraper_with_log();
    scraper.scrape_jobs(&[OFFLINE, BROKEN]).await;

    assert!(scraper.jobs().is_empty());
    assert_eq!(recorded(&log), vec![BROKEN.to_string(), BROKEN.to_string()]);
}

#[tokio::test]
async fn validation_can_be_disabled() {
    let fetcher = StubFetcher::new(&[(OFFLINE, html("<h2>Offline Job</h2>"))]);
    let probe = StubProbe {
        unreachable: vec![OFFLINE],
    };
    let settings = ScrapeSettings {
        validate_urls: false,
        ..fast_settings()
    };
    let mut scraper = JobScraper::new(fetcher, probe, settings);

    let jobs = scraper.scrape_jobs(&[OFFLINE]).await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].source_url, OFFLINE);
}

#[tokio::test]
async fn empty_pages_are_fetched_once_and_skipped() {
    let (mut scraper, log) = scraper_with_log();
    scraper.scrape_jobs(&[EMPTY]).await;

    assert!(scraper.jobs().is_empty());
    assert_eq!(recorded(&log), vec![EMPTY.to_string()]);
}

#[tokio::test]
async fn each_run_replaces_previous_results() {
    let mut scraper = scraper();
    scraper.scrape_jobs(&[FUZU]).await;
    assert_eq!(scraper.jobs().len(), 2);

    scraper.scrape_jobs(&[MYJOBMAG]).await;
    assert_eq!(scraper.jobs().len(), 1);
    assert_eq!(scraper.jobs()[0].job_title, "Nurse");
}

#[tokio::test]
async fn saved_files_hold_every_listing() {
    let mut scraper = scraper();
    scraper.scrape_jobs(&[FUZU, MYJOBMAG]).await;
    let dir = scratch_dir("exports");

    let csv_path = scraper.save_to_csv(&dir).expect("csv saved");
    let json_path = scraper.save_to_json(&dir).expect("json saved");

    let csv_name = csv_path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("csv file name");
    assert!(csv_name.starts_with("kenyan_jobs_") && csv_name.ends_with(".csv"));

    let csv = fs::read_to_string(&csv_path).expect("csv readable");
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("job_title,company_name,location"));

    let document = read_json(fs::File::open(&json_path).expect("json readable")).expect("json parses");
    assert_eq!(document.total_jobs, 3);
    assert_eq!(document.jobs, scraper.jobs());

    fs::remove_dir_all(&dir).expect("scratch dir removed");
}
