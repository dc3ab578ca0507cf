use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for a scraping run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub firecrawl: FirecrawlConfig,
    pub scrape: ScrapeConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an explicit key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = AppEnvironment::from_str(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let api_key = lookup("FIRECRAWL_API_KEY").filter(|value| !value.trim().is_empty());
        let api_url =
            lookup("FIRECRAWL_API_URL").unwrap_or_else(|| DEFAULT_FIRECRAWL_URL.to_string());

        let max_retries = parse_or(&lookup, "SCRAPER_MAX_RETRIES", 3u32)?;
        if max_retries == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "SCRAPER_MAX_RETRIES",
                value: "0".to_string(),
            });
        }
        let rate_limit_ms = parse_or(&lookup, "SCRAPER_RATE_LIMIT_MS", 2000u64)?;
        let output_dir = lookup("SCRAPER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_file = match lookup("APP_LOG_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        Ok(Self {
            environment,
            firecrawl: FirecrawlConfig { api_key, api_url },
            scrape: ScrapeConfig {
                max_retries,
                rate_limit: Duration::from_millis(rate_limit_ms),
                output_dir,
            },
            telemetry: TelemetryConfig {
                log_level,
                log_file,
            },
        })
    }
}

const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev";
const DEFAULT_LOG_FILE: &str = "job_scraper.log";

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

/// Credentials and endpoint for the remote scraping API.
#[derive(Clone)]
pub struct FirecrawlConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

impl FirecrawlConfig {
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

impl fmt::Debug for FirecrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirecrawlConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Batch behavior: retries, politeness delay, output location.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub max_retries: u32,
    pub rate_limit: Duration,
    pub output_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive whole number (got '{value}')")
            }
            ConfigError::MissingApiKey => write!(
                f,
                "FIRECRAWL_API_KEY not found; add it to the environment or a .env file"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
