//! Display formatting for table cells and summary cards.
//!
//! Rounding is half away from zero, so `1000.5` with no decimals renders as
//! `1,001`.

/// Shown wherever a value is absent.
pub const PLACEHOLDER: &str = "n/a";

const MAX_DECIMALS: u32 = 6;

/// Thousands-grouped decimal with exactly `decimals` fraction digits.
pub fn grouped(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let factor = 10u128.pow(decimals);
    let scaled = (value.abs() * factor as f64).round() as u128;
    let negative = value < 0.0 && scaled > 0;

    let int_part = (scaled / factor).to_string();
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 8);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if decimals > 0 {
        out.push('.');
        out.push_str(&format!("{:0width$}", scaled % factor, width = decimals as usize));
    }
    out
}

/// US-dollar amount, e.g. `$1,000.50` or `-$3.10`.
pub fn currency(value: f64, decimals: u32) -> String {
    let body = grouped(value, decimals);
    match body.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None if body == PLACEHOLDER => body,
        None => format!("${body}"),
    }
}

/// Whole-number count with thousands separators.
pub fn count(value: f64) -> String {
    grouped(value, 0)
}

pub fn percent(value: f64, decimals: u32) -> String {
    let body = grouped(value, decimals);
    if body == PLACEHOLDER {
        return body;
    }
    format!("{body}%")
}
