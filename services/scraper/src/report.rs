use kenya_jobs::salary::SalaryOutcome;
use kenya_jobs::scrape::ScrapeSummary;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 50;

pub(crate) fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Kenyan Job Board Scraper")?;
    writeln!(out, "{}", "=".repeat(40))
}

pub(crate) fn write_summary<W: Write>(out: &mut W, summary: &ScrapeSummary) -> io::Result<()> {
    if summary.total == 0 {
        return writeln!(out, "No jobs scraped yet.");
    }

    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "JOB SCRAPING SUMMARY")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Total jobs scraped: {}", summary.total)?;

    writeln!(out, "\nJobs by source:")?;
    for entry in &summary.by_source {
        writeln!(out, "  {}: {} jobs", entry.source_url, entry.jobs)?;
    }

    writeln!(out, "\nSample job listings:")?;
    for (index, job) in summary.samples.iter().enumerate() {
        writeln!(out, "\n{}. {}", index + 1, job.job_title)?;
        writeln!(out, "   Company: {}", job.company_name)?;
        writeln!(out, "   Location: {}", job.location)?;
        writeln!(out, "   Posted: {}", job.date_posted)?;
        writeln!(
            out,
            "   Salary: {} - {}",
            job.minimum_salary, job.maximum_salary
        )?;
    }
    Ok(())
}

pub(crate) fn write_saved_files<W: Write>(
    out: &mut W,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> io::Result<()> {
    if csv.is_none() && json.is_none() {
        return writeln!(out, "\nResults could not be saved; see the log for details.");
    }

    writeln!(out, "\nResults saved:")?;
    if let Some(path) = csv {
        writeln!(out, "   CSV: {}", path.display())?;
    }
    if let Some(path) = json {
        writeln!(out, "   JSON: {}", path.display())?;
    }
    Ok(())
}

pub(crate) fn write_salary<W: Write>(
    out: &mut W,
    text: &str,
    outcome: &SalaryOutcome,
) -> io::Result<()> {
    writeln!(out, "Input:   {text}")?;
    if let SalaryOutcome::Fault(fault) = outcome {
        writeln!(out, "Warning: {fault}")?;
    }

    let range = outcome.clone().into_range();
    writeln!(out, "Minimum: {}", range.minimum)?;
    writeln!(out, "Maximum: {}", range.maximum)
}
