//! Utility functions for reading numeric values in phylogenetic tree formats.

/// Parses the longest numeric prefix of `text` as a branch length.
///
/// Leading whitespace is skipped. The prefix may consist of an optional
/// sign, digits with an optional decimal point, and an optional exponent.
/// Trailing garbage is ignored. Text without a numeric prefix, as well as
/// values that overflow to infinity, yield `0.0`.
///
/// # Arguments
/// * `text` - Raw branch length text as found after `:`
///
/// # Returns
/// A finite value
///
/// # Examples
/// ```
/// # use cladeview::parser::utils::parse_float_prefix;
/// assert_eq!(parse_float_prefix("0.25"), 0.25);
/// assert_eq!(parse_float_prefix("  1.5e-1"), 0.15);
/// assert_eq!(parse_float_prefix("3.0kiwi"), 3.0);
/// assert_eq!(parse_float_prefix(".5"), 0.5);
/// assert_eq!(parse_float_prefix("-2"), -2.0);
/// assert_eq!(parse_float_prefix("1e"), 1.0);
/// assert_eq!(parse_float_prefix("takahe"), 0.0);
/// assert_eq!(parse_float_prefix(""), 0.0);
/// assert_eq!(parse_float_prefix("1e999"), 0.0);
/// ```
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let end = numeric_prefix_len(trimmed.as_bytes());
    if end == 0 {
        return 0.0;
    }

    match trimmed[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Length in bytes of the longest prefix of `bytes` forming a decimal number.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    // Exponent only counts if followed by at least one digit
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_float_prefix("1"), 1.0);
        assert_eq!(parse_float_prefix("0.001"), 0.001);
        assert_eq!(parse_float_prefix("+4.5"), 4.5);
        assert_eq!(parse_float_prefix("7."), 7.0);
        assert_eq!(parse_float_prefix("2E3"), 2000.0);
    }

    #[test]
    fn test_prefix_stops_at_garbage() {
        assert_eq!(parse_float_prefix("1.2.3"), 1.2);
        assert_eq!(parse_float_prefix("5 6"), 5.0);
        assert_eq!(parse_float_prefix("4e+"), 4.0);
        assert_eq!(parse_float_prefix("9[&rate=1]"), 9.0);
    }

    #[test]
    fn test_no_number_is_zero() {
        assert_eq!(parse_float_prefix("-"), 0.0);
        assert_eq!(parse_float_prefix("."), 0.0);
        assert_eq!(parse_float_prefix("-.e5"), 0.0);
        assert_eq!(parse_float_prefix("NaN"), 0.0);
        assert_eq!(parse_float_prefix("Infinity"), 0.0);
        assert_eq!(parse_float_prefix("   "), 0.0);
    }
}
