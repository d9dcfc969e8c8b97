//! Result formatting shared by every front-end.

const SCI_UPPER: f64 = 1e15;
const SCI_LOWER: f64 = 1e-4;
const INTEGRAL_TOLERANCE: f64 = 1e-12;
const SIGNIFICANT_DIGITS: usize = 10;

/// Formats a result for display.
///
/// Very large or very small magnitudes use scientific notation, values
/// within 1e-12 of an integer print as that integer, anything else gets ten
/// significant digits with trailing zeros removed.
pub fn format_result(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude > SCI_UPPER || (magnitude < SCI_LOWER && x != 0.0) {
        return scientific(x, 6);
    }

    let truncated = x.trunc();
    if (x - truncated).abs() < INTEGRAL_TOLERANCE {
        return (truncated as i64).to_string();
    }

    general(x, SIGNIFICANT_DIGITS)
}

// Mantissa with `decimals` fractional digits, exponent signed and at least
// two digits wide: 1.500000e+16.
fn scientific(x: f64, decimals: usize) -> String {
    let raw = format!("{:.*e}", decimals, x);
    let (mantissa, exponent) = split_exponent(&raw);
    join_exponent(mantissa, exponent)
}

// printf-style %g: `digits` significant digits, fixed notation unless the
// decimal exponent is below -4 or at least `digits`.
fn general(x: f64, digits: usize) -> String {
    let raw = format!("{:.*e}", digits - 1, x);
    let (mantissa, exponent) = split_exponent(&raw);

    if exponent < -4 || exponent >= digits as i32 {
        return join_exponent(strip_zeros(mantissa), exponent);
    }

    let decimals = (digits as i32 - 1 - exponent) as usize;
    strip_zeros(&format!("{:.*}", decimals, x)).to_string()
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn join_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
