use regex::Regex;
use serde::Serialize;

use crate::salary::NOT_SPECIFIED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteId {
    BrighterMonday,
    Fuzu,
    MyJobMag,
    Generic,
}

impl SiteId {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BrighterMonday => "BrighterMonday",
            Self::Fuzu => "Fuzu",
            Self::MyJobMag => "MyJobMag",
            Self::Generic => "Generic",
        }
    }
}

/// How a single listing field is recovered from a job block.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// First capture group of `pattern` searched inside the block.
    Capture { pattern: Regex, default: String },
    /// First capture group of the block pattern itself.
    BlockCapture,
    Fixed(String),
}

impl FieldRule {
    pub fn capture(pattern: &str, default: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::Capture {
            pattern: Regex::new(pattern)?,
            default: default.into(),
        })
    }

    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    pub(crate) fn resolve(&self, block: &str, block_capture: Option<&str>) -> String {
        match self {
            FieldRule::Capture { pattern, default } => pattern
                .captures(block)
                .and_then(|captures| captures.get(1))
                .map(|value| value.as_str().trim().to_string())
                .unwrap_or_else(|| default.clone()),
            FieldRule::BlockCapture => block_capture
                .map(|value| value.trim().to_string())
                .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            FieldRule::Fixed(value) => value.clone(),
        }
    }
}

/// Extraction rules for one job board.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub site: SiteId,
    pub block: Regex,
    pub title: FieldRule,
    pub company: FieldRule,
    pub location: FieldRule,
    pub date_posted: FieldRule,
    pub salary: FieldRule,
    pub description: FieldRule,
    pub limit: Option<usize>,
    /// Recorded as `source_url` on every listing; the requested URL when unset.
    pub source_url: Option<String>,
}

impl PatternSet {
    /// A set whose block pattern captures the title, with the placeholder
    /// company, location, date and description used for heading scans.
    pub fn heading_scan(site: SiteId, block: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            site,
            block: Regex::new(block)?,
            title: FieldRule::BlockCapture,
            company: FieldRule::fixed("Company not specified"),
            location: FieldRule::fixed("Kenya"),
            date_posted: FieldRule::fixed("Recent"),
            salary: FieldRule::fixed(NOT_SPECIFIED),
            description: FieldRule::fixed("Job description not available"),
            limit: None,
            source_url: None,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    pub fn brighter_monday() -> Self {
        let class_capture = |class: &str| {
            builtin(FieldRule::capture(
                &format!(r#"(?i)<[^>]*class="[^"]*{class}[^"]*"[^>]*>([^<]+)"#),
                NOT_SPECIFIED,
            ))
        };

        Self {
            site: SiteId::BrighterMonday,
            block: builtin(Regex::new(
                r#"(?s)<div[^>]*class="[^"]*job[^"]*item[^"]*"[^>]*>.*?</div>"#,
            )),
            title: builtin(FieldRule::capture(
                r#"(?i)<h[1-6][^>]*class="[^"]*job[^"]*title[^"]*"[^>]*>([^<]+)"#,
                NOT_SPECIFIED,
            )),
            company: class_capture("company"),
            location: class_capture("location"),
            date_posted: class_capture("date"),
            salary: class_capture("salary"),
            description: builtin(FieldRule::capture(
                r"<p[^>]*>([^<]{50,})</p>",
                "No description available",
            )),
            limit: None,
            source_url: Some("https://www.brightermonday.co.ke".to_string()),
        }
    }

    pub fn fuzu() -> Self {
        builtin(Self::heading_scan(
            SiteId::Fuzu,
            r"(?i)<h[1-6][^>]*>([^<]*(?:job|position|role)[^<]*)</h[1-6]>",
        ))
        .with_limit(10)
        .with_source_url("https://www.fuzu.com/job")
    }

    pub fn myjobmag() -> Self {
        let mut patterns = builtin(Self::heading_scan(
            SiteId::MyJobMag,
            r"(?s)<article[^>]*>.*?</article>",
        ))
        .with_limit(10)
        .with_source_url("https://www.myjobmag.co.ke");
        patterns.title = builtin(FieldRule::capture(
            r"<h[1-6][^>]*>([^<]+)</h[1-6]>",
            "Job position available",
        ));
        patterns
    }

    pub fn generic() -> Self {
        builtin(Self::heading_scan(
            SiteId::Generic,
            r"(?i)<h[1-6][^>]*>([^<]*(?:job|position|role|vacancy|opportunity)[^<]*)</h[1-6]>",
        ))
        .with_limit(5)
    }
}

fn builtin<T>(compiled: Result<T, regex::Error>) -> T {
    compiled.expect("built-in listing pattern compiles")
}

/// Maps URL substrings to pattern sets, falling back to a generic scan.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    entries: Vec<(String, PatternSet)>,
    fallback: PatternSet,
}

impl SiteRegistry {
    pub fn new(fallback: PatternSet) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    pub fn standard() -> Self {
        Self::new(PatternSet::generic())
            .with("brightermonday", PatternSet::brighter_monday())
            .with("fuzu", PatternSet::fuzu())
            .with("myjobmag", PatternSet::myjobmag())
    }

    /// Later registrations are consulted after earlier ones.
    pub fn register(&mut self, needle: impl Into<String>, patterns: PatternSet) -> &mut Self {
        self.entries.push((needle.into().to_lowercase(), patterns));
        self
    }

    pub fn with(mut self, needle: impl Into<String>, patterns: PatternSet) -> Self {
        self.register(needle, patterns);
        self
    }

    pub fn resolve(&self, url: &str) -> &PatternSet {
        let lowered = url.to_lowercase();
        self.entries
            .iter()
            .find(|(needle, _)| lowered.contains(needle.as_str()))
            .map(|(_, patterns)| patterns)
            .unwrap_or(&self.fallback)
    }

    pub fn sites(&self) -> impl Iterator<Item = SiteId> + '_ {
        self.entries
            .iter()
            .map(|(_, patterns)| patterns.site)
            .chain(std::iter::once(self.fallback.site))
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_resolves_by_url_substring() {
        let registry = SiteRegistry::standard();
        assert_eq!(
            registry.resolve("https://www.BrighterMonday.co.ke/jobs").site,
            SiteId::BrighterMonday
        );
        assert_eq!(registry.resolve("https://www.fuzu.com/job").site, SiteId::Fuzu);
        assert_eq!(
            registry.resolve("https://www.myjobmag.co.ke/page/2").site,
            SiteId::MyJobMag
        );
        assert_eq!(
            registry.resolve("https://careers.example.org").site,
            SiteId::Generic
        );
    }

    #[test]
    fn registry_lists_entries_then_fallback() {
        let sites: Vec<_> = SiteRegistry::standard().sites().collect();
        assert_eq!(
            sites,
            vec![
                SiteId::BrighterMonday,
                SiteId::Fuzu,
                SiteId::MyJobMag,
                SiteId::Generic
            ]
        );
    }

    #[test]
    fn capture_rule_trims_and_defaults() {
        let rule = FieldRule::capture(r"<b>([^<]+)</b>", "none").expect("valid pattern");
        assert_eq!(rule.resolve("<b>  Nairobi </b>", None), "Nairobi");
        assert_eq!(rule.resolve("<i>Nairobi</i>", None), "none");
    }

    #[test]
    fn block_capture_without_group_falls_back_to_sentinel() {
        assert_eq!(FieldRule::BlockCapture.resolve("x", Some(" Role ")), "Role");
        assert_eq!(FieldRule::BlockCapture.resolve("x", None), NOT_SPECIFIED);
    }

    #[test]
    fn invalid_custom_patterns_are_reported() {
        assert!(FieldRule::capture("(unclosed", "x").is_err());
        assert!(PatternSet::heading_scan(SiteId::Generic, "[").is_err());
    }
}
