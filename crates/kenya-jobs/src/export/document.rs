use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

use super::ExportError;
use crate::listings::{format_timestamp, JobListing};

/// Structured run document: timestamp, count and every listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobExport {
    pub scraped_at: String,
    pub total_jobs: usize,
    pub jobs: Vec<JobListing>,
}

#[derive(Serialize)]
struct JobExportRef<'a> {
    scraped_at: String,
    total_jobs: usize,
    jobs: &'a [JobListing],
}

pub fn write_json<W: Write>(
    writer: W,
    jobs: &[JobListing],
    scraped_at: NaiveDateTime,
) -> Result<(), ExportError> {
    let document = JobExportRef {
        scraped_at: format_timestamp(scraped_at),
        total_jobs: jobs.len(),
        jobs,
    };
    serde_json::to_writer_pretty(writer, &document)?;
    Ok(())
}

pub fn save_json<P: AsRef<Path>>(
    path: P,
    jobs: &[JobListing],
    scraped_at: NaiveDateTime,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    write_json(&mut writer, jobs, scraped_at)?;
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), count = jobs.len(), "jobs saved to JSON");
    Ok(())
}

pub fn read_json<R: Read>(reader: R) -> Result<JobExport, ExportError> {
    Ok(serde_json::from_reader(reader)?)
}
