use crate::cli::RunArgs;
use crate::prompt::prompt_for_urls;
use crate::report::{write_banner, write_saved_files, write_summary};
use kenya_jobs::config::AppConfig;
use kenya_jobs::error::AppError;
use kenya_jobs::export::ExportError;
use kenya_jobs::fetch::{FirecrawlClient, HttpProbe, VALIDATION_TIMEOUT};
use kenya_jobs::scrape::{JobScraper, ScrapeSettings, DEFAULT_URLS};
use kenya_jobs::telemetry;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};

pub(crate) async fn run(args: RunArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = args.output_dir {
        config.scrape.output_dir = dir;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, output_dir = %config.scrape.output_dir.display(), "job scraper starting");

    let fetcher = FirecrawlClient::from_config(&config.firecrawl)?;
    let probe = HttpProbe::new(VALIDATION_TIMEOUT)?;
    let settings = ScrapeSettings {
        validate_urls: !args.skip_validation,
        ..ScrapeSettings::from_config(&config.scrape)
    };

    let mut out = io::stdout();
    write_banner(&mut out)?;

    let mut urls: Vec<String> = if args.no_defaults {
        Vec::new()
    } else {
        DEFAULT_URLS.iter().map(|url| url.to_string()).collect()
    };
    urls.extend(args.urls);
    if args.interactive {
        urls.extend(prompt_for_urls(io::stdin().lock(), &mut out)?);
    }

    if urls.is_empty() {
        writeln!(out, "No job board URLs to scrape.")?;
        return Ok(());
    }

    writeln!(out, "\nScraping {} job boards...", urls.len())?;
    writeln!(out, "This may take a few minutes...\n")?;
    out.flush()?;

    let mut scraper = JobScraper::new(fetcher, probe, settings);
    scraper.scrape_jobs(urls.as_slice()).await;

    if scraper.jobs().is_empty() {
        writeln!(
            out,
            "No jobs were scraped. Check your internet connection and API key."
        )?;
        return Ok(());
    }

    write_summary(&mut out, &scraper.summary())?;

    let output_dir = config.scrape.output_dir.as_path();
    let csv = saved_path(scraper.save_to_csv(output_dir), "CSV");
    let json = saved_path(scraper.save_to_json(output_dir), "JSON");

    write_saved_files(&mut out, csv.as_deref(), json.as_deref())?;
    out.flush()?;
    Ok(())
}

/// Keeps the path of a written file; a failed save is logged and skipped so
/// the other format is still attempted.
fn saved_path(result: Result<PathBuf, ExportError>, format: &str) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(err) => {
            error!(format, error = %err, "error saving results");
            None
        }
    }
}
