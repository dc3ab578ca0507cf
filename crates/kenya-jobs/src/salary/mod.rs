//! Interprets free-form salary text as a normalized KES minimum/maximum pair.
//!
//! Salary strings scraped from job boards are loosely formatted: currency
//! symbols, `K` shorthand, ranges, or phrases such as "Negotiable". The
//! interpreter never fails outright; anything it cannot read becomes the
//! [`NOT_SPECIFIED`] pair so one malformed listing never aborts a batch.

mod normalizer;
mod parser;

use parser::SalaryTokens;
use tracing::warn;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const CURRENCY_PREFIX: &str = "KES ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryRange {
    pub minimum: String,
    pub maximum: String,
}

impl SalaryRange {
    pub fn not_specified() -> Self {
        Self {
            minimum: NOT_SPECIFIED.to_string(),
            maximum: NOT_SPECIFIED.to_string(),
        }
    }

    pub fn single(value: String) -> Self {
        Self {
            minimum: value.clone(),
            maximum: value,
        }
    }

    pub fn is_specified(&self) -> bool {
        self.minimum != NOT_SPECIFIED
    }

    pub fn into_pair(self) -> (String, String) {
        (self.minimum, self.maximum)
    }
}

/// Result of interpreting salary text, keeping "nothing stated" apart from
/// "gave up because of an internal fault".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryOutcome {
    Parsed(SalaryRange),
    Unspecified,
    Fault(SalaryFault),
}

impl SalaryOutcome {
    pub fn into_range(self) -> SalaryRange {
        match self {
            SalaryOutcome::Parsed(range) => range,
            SalaryOutcome::Unspecified | SalaryOutcome::Fault(_) => SalaryRange::not_specified(),
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, SalaryOutcome::Fault(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SalaryFault {
    #[error("salary token '{token}' is outside the representable range")]
    Overflow { token: String },
}

pub fn interpret(text: Option<&str>) -> SalaryOutcome {
    let text = match text {
        Some(value) if !value.is_empty() => value,
        _ => return SalaryOutcome::Unspecified,
    };

    if parser::is_no_value_phrase(text) {
        return SalaryOutcome::Unspecified;
    }

    let sanitized = parser::sanitize(text);
    let parsed = match parser::find_tokens(&sanitized) {
        Some(SalaryTokens::Range(minimum, maximum)) => normalize_range(minimum, maximum),
        Some(SalaryTokens::Single(value)) => {
            normalizer::normalize_token(value).map(SalaryRange::single)
        }
        None => return SalaryOutcome::Unspecified,
    };

    match parsed {
        Ok(range) => SalaryOutcome::Parsed(range),
        Err(fault) => {
            warn!(salary = text, error = %fault, "error parsing salary");
            SalaryOutcome::Fault(fault)
        }
    }
}

/// Range ends keep their source order; `80,000 - 50,000` is not swapped.
fn normalize_range(minimum: &str, maximum: &str) -> Result<SalaryRange, SalaryFault> {
    Ok(SalaryRange {
        minimum: normalizer::normalize_token(minimum)?,
        maximum: normalizer::normalize_token(maximum)?,
    })
}

pub fn parse_salary_range(text: &str) -> SalaryRange {
    interpret(Some(text)).into_range()
}

/// Formats one salary token (`50K`, `50,000`) as a KES amount. Tokens that
/// are not numeric come back unchanged.
pub fn normalize_salary(token: &str) -> Result<String, SalaryFault> {
    normalizer::normalize_token(token)
}
