use crate::report::write_salary;
use crate::scrape;
use clap::{Args, Parser, Subcommand};
use kenya_jobs::error::AppError;
use kenya_jobs::salary;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Kenyan Job Board Scraper",
    about = "Collect job listings from Kenyan job boards into CSV and JSON files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape job boards and save the listings (default command)
    Run(RunArgs),
    /// Interpret a salary string the way scraped listings are normalized
    Salary(SalaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct RunArgs {
    /// Additional job board URL to scrape (repeatable)
    #[arg(long = "url", value_parser = parse_url)]
    pub(crate) urls: Vec<String>,
    /// Only scrape URLs given on the command line or at the prompt
    #[arg(long)]
    pub(crate) no_defaults: bool,
    /// Prompt for additional URLs before scraping
    #[arg(long)]
    pub(crate) interactive: bool,
    /// Skip the reachability check before each scrape
    #[arg(long)]
    pub(crate) skip_validation: bool,
    /// Override the configured output directory
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SalaryArgs {
    /// Raw salary text, e.g. "KES 50,000 - 80,000"
    text: String,
}

pub(crate) fn parse_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.starts_with("http") {
        Ok(trimmed.to_string())
    } else {
        Err(format!(
            "'{raw}' is not a valid URL; it must start with http:// or https://"
        ))
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| {
        Command::Run(RunArgs {
            interactive: true,
            ..RunArgs::default()
        })
    });

    match command {
        Command::Run(args) => scrape::run(args).await,
        Command::Salary(args) => {
            let mut stdout = io::stdout();
            write_salary(&mut stdout, &args.text, &salary::interpret(Some(&args.text)))?;
            stdout.flush()?;
            Ok(())
        }
    }
}
