use chrono::{Local, NaiveDateTime, Timelike};
use tracing::info;

use super::domain::{truncate_description, JobListing};
use super::sites::{PatternSet, SiteRegistry};
use crate::salary;

/// Applies the registered pattern set for a URL to scraped page content.
#[derive(Debug, Clone, Default)]
pub struct ListingExtractor {
    registry: SiteRegistry,
}

impl ListingExtractor {
    pub fn new(registry: SiteRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn extract(&self, content: &str, url: &str) -> Vec<JobListing> {
        self.extract_at(content, url, Local::now().naive_local())
    }

    pub fn extract_at(
        &self,
        content: &str,
        url: &str,
        scraped_at: NaiveDateTime,
    ) -> Vec<JobListing> {
        let patterns = self.registry.resolve(url);
        let scraped_at = format_timestamp(scraped_at);
        let source_url = patterns.source_url.as_deref().unwrap_or(url);

        let jobs: Vec<JobListing> = patterns
            .block
            .captures_iter(content)
            .take(patterns.limit.unwrap_or(usize::MAX))
            .map(|captures| {
                let block = captures.get(0).map_or("", |block| block.as_str());
                let heading = captures.get(1).map(|heading| heading.as_str());
                build_listing(patterns, block, heading, source_url, &scraped_at)
            })
            .collect();

        info!(
            url,
            site = patterns.site.label(),
            count = jobs.len(),
            "extracted jobs"
        );
        jobs
    }
}

fn build_listing(
    patterns: &PatternSet,
    block: &str,
    heading: Option<&str>,
    source_url: &str,
    scraped_at: &str,
) -> JobListing {
    let salary_text = patterns.salary.resolve(block, heading);
    let (minimum_salary, maximum_salary) = salary::parse_salary_range(&salary_text).into_pair();
    let description = patterns.description.resolve(block, heading);

    JobListing {
        job_title: patterns.title.resolve(block, heading),
        company_name: patterns.company.resolve(block, heading),
        location: patterns.location.resolve(block, heading),
        date_posted: patterns.date_posted.resolve(block, heading),
        minimum_salary,
        maximum_salary,
        job_description: truncate_description(&description),
        source_url: source_url.to_string(),
        scraped_at: scraped_at.to_string(),
    }
}

/// ISO-8601 local timestamp, e.g. `2025-01-31T09:30:00.250000`. The
/// fraction is left out when there are no whole microseconds.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}
