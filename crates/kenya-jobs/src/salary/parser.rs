use regex::Regex;
use std::sync::OnceLock;

static RANGE_PATTERN: OnceLock<Regex> = OnceLock::new();
static SINGLE_PATTERN: OnceLock<Regex> = OnceLock::new();
static DECIMAL_DIGIT: OnceLock<Regex> = OnceLock::new();

const NO_VALUE_PHRASES: &[&str] = &["not specified", "negotiable", "competitive"];

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SalaryTokens<'a> {
    Range(&'a str, &'a str),
    Single(&'a str),
}

pub(crate) fn is_no_value_phrase(text: &str) -> bool {
    let lowered = text.to_lowercase();
    NO_VALUE_PHRASES.contains(&lowered.as_str())
}

/// Keeps decimal digits of any script, whitespace, `-`, `,` and the `K`
/// shorthand, upper-cased.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| {
            is_decimal_digit(*c) || c.is_whitespace() || matches!(c, '-' | ',' | 'k' | 'K')
        })
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Unicode `Nd` characters: ASCII digits, fullwidth digits, Arabic-Indic, ...
pub(crate) fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let mut buffer = [0u8; 4];
    decimal_digit_pattern().is_match(c.encode_utf8(&mut buffer))
}

/// Value of a decimal digit in any script.
///
/// `Nd` digits are encoded as contiguous ascending runs of ten starting at
/// zero, so the value is the offset from the start of the run.
pub(crate) fn decimal_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = u32::from(c);
    while let Some(previous) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(previous) {
            break;
        }
        start -= 1;
    }
    Some((u32::from(c) - start) % 10)
}

/// Rewrites every decimal digit as its ASCII form, leaving other characters.
pub(crate) fn ascii_digits(token: &str) -> String {
    token
        .chars()
        .map(|c| match decimal_value(c) {
            Some(value) => char::from_digit(value, 10).unwrap_or(c),
            None => c,
        })
        .collect()
}

pub(crate) fn find_tokens(sanitized: &str) -> Option<SalaryTokens<'_>> {
    if let Some(captures) = range_pattern().captures(sanitized) {
        if let (Some(minimum), Some(maximum)) = (captures.get(1), captures.get(2)) {
            return Some(SalaryTokens::Range(minimum.as_str(), maximum.as_str()));
        }
    }

    single_pattern()
        .find(sanitized)
        .map(|token| SalaryTokens::Single(token.as_str()))
}

fn range_pattern() -> &'static Regex {
    RANGE_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:,\d+)*K?)\s*-\s*(\d+(?:,\d+)*K?)")
            .expect("salary range pattern compiles")
    })
}

fn single_pattern() -> &'static Regex {
    SINGLE_PATTERN.get_or_init(|| {
        Regex::new(r"\d+(?:,\d+)*K?").expect("salary value pattern compiles")
    })
}

fn decimal_digit_pattern() -> &'static Regex {
    DECIMAL_DIGIT.get_or_init(|| Regex::new(r"^\p{Nd}$").expect("decimal digit pattern compiles"))
}

#[cfg(test)]
pub(crate) fn tokens_for_tests(text: &str) -> Option<(String, Option<String>)> {
    let sanitized = sanitize(text);
    find_tokens(&sanitized).map(|tokens| match tokens {
        SalaryTokens::Range(minimum, maximum) => (minimum.to_string(), Some(maximum.to_string())),
        SalaryTokens::Single(value) => (value.to_string(), None),
    })
}
