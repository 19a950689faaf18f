/// Parse the longest leading decimal number in `text`, ignoring leading
/// whitespace and any trailing garbage (`"12.5 A"` -> 12.5).
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    trimmed[..end].parse::<f64>().ok()
}

/// Sensor value: unparsable or non-finite input reads as 0.
pub fn sensor_value(text: &str) -> f64 {
    parse_float_prefix(text)
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Limit value: unparsable or non-finite input is sent as `null`.
pub fn limit_value(text: &str) -> Option<f64> {
    parse_float_prefix(text).filter(|value| value.is_finite())
}

/// Optional text field: blank is `None`.
pub fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
