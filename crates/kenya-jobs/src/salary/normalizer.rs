use super::parser::ascii_digits;
use super::{SalaryFault, CURRENCY_PREFIX};

pub(crate) fn normalize_token(token: &str) -> Result<String, SalaryFault> {
    if token.contains(['K', 'k']) {
        return normalize_thousands(token);
    }

    let digits: String = ascii_digits(token).chars().filter(|c| *c != ',').collect();
    let digits = digits.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(token.to_string());
    }

    Ok(format_amount(digits))
}

fn normalize_thousands(token: &str) -> Result<String, SalaryFault> {
    let stripped: String = ascii_digits(token)
        .chars()
        .filter(|c| !matches!(c, 'K' | 'k' | ','))
        .collect();

    let value = match stripped.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => return Ok(token.to_string()),
    };

    let scaled = (value * 1000.0).trunc();
    if !scaled.is_finite() {
        return Err(SalaryFault::Overflow {
            token: token.to_string(),
        });
    }

    // Zero-precision formatting prints the exact integer value of the float.
    Ok(format_amount(&format!("{:.0}", scaled)))
}

fn format_amount(digits: &str) -> String {
    format!("{CURRENCY_PREFIX}{}", group_thousands(digits))
}

/// Comma-groups an ASCII digit string, dropping leading zeros.
pub(crate) fn group_thousands(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let significant = if significant.is_empty() { "0" } else { significant };

    let mut grouped = String::with_capacity(significant.len() + significant.len() / 3);
    for (index, digit) in significant.chars().enumerate() {
        if index > 0 && (significant.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes_from_the_right() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("0045000"), "45,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn thousands_shorthand_truncates_fractional_products() {
        assert_eq!(normalize_token("2.0005K").unwrap(), "KES 2,000");
        assert_eq!(normalize_token("1,5K").unwrap(), "KES 15,000");
    }

    #[test]
    fn non_numeric_residue_is_returned_unchanged() {
        assert_eq!(normalize_token("abc").unwrap(), "abc");
        assert_eq!(normalize_token("XK").unwrap(), "XK");
        assert_eq!(normalize_token(",").unwrap(), ",");
    }

    #[test]
    fn large_shorthand_prints_the_exact_float_value() {
        let token = format!("1{}K", "0".repeat(39));
        assert_eq!(
            normalize_token(&token).unwrap(),
            "KES 999,999,999,999,999,890,143,207,767,403,382,423,158,784"
        );
    }

    #[test]
    fn infinite_shorthand_is_a_fault() {
        let token = format!("{}K", "9".repeat(400));
        let fault = normalize_token(&token).expect_err("overflow detected");
        assert_eq!(fault, SalaryFault::Overflow { token });
    }

    #[test]
    fn digits_from_other_scripts_are_normalized() {
        assert_eq!(normalize_token("５０K").unwrap(), "KES 50,000");
        assert_eq!(normalize_token("٥٠,٠٠٠").unwrap(), "KES 50,000");
        assert_eq!(normalize_token("१२००००").unwrap(), "KES 120,000");
    }
}
