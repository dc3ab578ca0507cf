mod document;
mod tabular;

pub use document::{read_json, save_json, write_json, JobExport};
pub use tabular::{save_csv, write_csv};

use chrono::NaiveDateTime;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV output: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// `kenyan_jobs_YYYYmmdd_HHMMSS.<extension>`
pub fn default_file_name(extension: &str, now: NaiveDateTime) -> String {
    format!("kenyan_jobs_{}.{extension}", now.format("%Y%m%d_%H%M%S"))
}
