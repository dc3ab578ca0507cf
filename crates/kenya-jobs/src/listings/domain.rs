use serde::{Deserialize, Serialize};

use crate::salary::SalaryRange;

/// Descriptions longer than this many characters are cut and suffixed.
pub const DESCRIPTION_LIMIT: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

/// One scraped posting. Field order is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub job_title: String,
    pub company_name: String,
    pub location: String,
    pub date_posted: String,
    pub minimum_salary: String,
    pub maximum_salary: String,
    pub job_description: String,
    pub source_url: String,
    pub scraped_at: String,
}

impl JobListing {
    pub fn salary(&self) -> SalaryRange {
        SalaryRange {
            minimum: self.minimum_salary.clone(),
            maximum: self.maximum_salary.clone(),
        }
    }
}

pub fn truncate_description(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &description[..cut]),
        None => description.to_string(),
    }
}
