use std::time::Duration;
use tracing::{error, info, warn};

use super::{FetchError, PageFetcher, ScrapedPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Backoff slept after the zero-based `attempt` fails: `base * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Scrapes `url`, retrying failed requests with exponential backoff.
///
/// A response without page data is retried immediately. Returns `None` once
/// every attempt is spent.
pub async fn fetch_with_retry<F>(fetcher: &F, url: &str, policy: &RetryPolicy) -> Option<ScrapedPage>
where
    F: PageFetcher + ?Sized,
{
    for attempt in 0..policy.max_attempts {
        info!(
            url,
            attempt = attempt + 1,
            max_attempts = policy.max_attempts,
            "scraping page"
        );

        match fetcher.scrape(url).await {
            Ok(page) => {
                info!(url, "successfully scraped page");
                return Some(page);
            }
            Err(FetchError::NoData) => warn!(url, "no data returned"),
            Err(err) => {
                error!(url, attempt = attempt + 1, error = %err, "scrape attempt failed");
                if attempt + 1 < policy.max_attempts {
                    tokio::time::sleep(policy.delay_after(attempt)).await;
                }
            }
        }
    }

    error!(
        url,
        attempts = policy.max_attempts,
        "failed to scrape page after retries"
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    enum Reply {
        Page(&'static str),
        NoData,
        Unavailable,
    }

    struct ScriptedFetcher {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<u32>,
    }

    impl ScriptedFetcher {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().expect("calls mutex poisoned")
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn scrape(&self, _url: &str) -> Result<ScrapedPage, FetchError> {
            *self.calls.lock().expect("calls mutex poisoned") += 1;
            let reply = self
                .replies
                .lock()
                .expect("replies mutex poisoned")
                .pop_front()
                .unwrap_or(Reply::Unavailable);

            match reply {
                Reply::Page(html) => Ok(ScrapedPage {
                    html: Some(html.to_string()),
                    markdown: None,
                }),
                Reply::NoData => Err(FetchError::NoData),
                Reply::Unavailable => Err(FetchError::Api {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(0), Duration::from_secs(1));
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
        assert_eq!(RetryPolicy::new(5).max_attempts, 5);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let fetcher =
            ScriptedFetcher::new(vec![Reply::Unavailable, Reply::NoData, Reply::Page("<h1/>")]);
        let page = fetch_with_retry(&fetcher, "https://www.fuzu.com/job", &instant(3))
            .await
            .expect("third attempt succeeds");
        assert_eq!(page.content(), "<h1/>");
        assert_eq!(fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let page = fetch_with_retry(&fetcher, "https://www.fuzu.com/job", &instant(2)).await;
        assert!(page.is_none());
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let fetcher = ScriptedFetcher::new(vec![Reply::Page("ok"), Reply::Page("unused")]);
        fetch_with_retry(&fetcher, "https://www.fuzu.com/job", &instant(3))
            .await
            .expect("first attempt succeeds");
        assert_eq!(fetcher.calls(), 1);
    }
}
