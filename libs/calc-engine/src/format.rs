//! Number rendering for results and history entries
//!
//! Presentation formatting is pure and never feeds back into stored history,
//! which always carries the full-precision value.

/// Significant digits used by [`format_result`]
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Render a result for display
///
/// Whole numbers print as integers. Everything else uses 6 significant
/// digits in the shortest clean form (`0.333333`, `1.23457e+06`).
pub fn format_result(value: f64) -> String {
    format_with_precision(value, DEFAULT_SIGNIFICANT_DIGITS)
}

/// Render a result with the given number of significant digits
///
/// Follows the `%g` conventions: fixed notation while the decimal exponent
/// is within `-4..digits`, scientific notation outside it, trailing zeros
/// removed in both cases.
pub fn format_with_precision(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.fract() == 0.0 {
        // -0.0 is whole too
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", value);
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{:.*}", decimals, value);
        trim_fraction(&fixed).to_string()
    }
}

/// Full-precision rendering used inside history entries
pub fn describe_number(value: f64) -> String {
    value.to_string()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
