//! SPICE-style numeric values with engineering suffixes.

/// Parse a value such as `100`, `1k`, `10pF`, `2.2meg` or `1e-9`.
///
/// Recognized multipliers (case-insensitive): `f p n u m k meg g t` and `mil`.
/// Letters after the multiplier are accepted as a unit name, but digits are
/// not, so a model name like `2N3904` is rejected rather than read as `2e-9`.
pub fn parse_value(token: &str) -> Option<f64> {
    let (number, rest) = split_number(token)?;
    let mantissa: f64 = number.parse().ok()?;

    let rest = rest.to_ascii_lowercase();
    let (scale, unit) = if let Some(unit) = rest.strip_prefix("meg") {
        (1e6, unit)
    } else if let Some(unit) = rest.strip_prefix("mil") {
        (25.4e-6, unit)
    } else {
        match rest.chars().next() {
            Some('f') => (1e-15, &rest[1..]),
            Some('p') => (1e-12, &rest[1..]),
            Some('n') => (1e-9, &rest[1..]),
            Some('u') => (1e-6, &rest[1..]),
            Some('m') => (1e-3, &rest[1..]),
            Some('k') => (1e3, &rest[1..]),
            Some('g') => (1e9, &rest[1..]),
            Some('t') => (1e12, &rest[1..]),
            _ => (1.0, rest.as_str()),
        }
    };

    if !unit.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let value = mantissa * scale;
    value.is_finite().then_some(value)
}

/// Split a token into its leading floating-point literal and the remainder.
fn split_number(token: &str) -> Option<(&str, &str)> {
    let bytes = token.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let digits_start = end;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !token[digits_start..end].bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    Some((&token[..end], &token[end..]))
}
