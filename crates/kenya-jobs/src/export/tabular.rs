use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::ExportError;
use crate::listings::JobListing;

/// One header row from the listing field names, then one row per listing.
/// Nothing at all is written for an empty slice.
pub fn write_csv<W: Write>(writer: W, jobs: &[JobListing]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for job in jobs {
        csv_writer.serialize(job)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(path: P, jobs: &[JobListing]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_csv(BufWriter::new(file), jobs)?;
    info!(path = %path.display(), count = jobs.len(), "jobs saved to CSV");
    Ok(())
}
