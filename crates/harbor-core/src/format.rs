//! Display formatting shared by the panels and scene tooltips.

use chrono::{DateTime, Utc};

/// en-US number formatting with thousands separators and at most one
/// fraction digit: `1020000.0` → `"1,020,000"`, `5.25` → `"5.3"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let tenths = (value.abs() * 10.0).round() as u64;
    let whole = tenths / 10;
    let fraction = tenths % 10;
    let sign = if value < 0.0 && tenths != 0 { "-" } else { "" };

    let mut out = format!("{sign}{}", group_digits(whole));
    if fraction != 0 {
        out.push('.');
        out.push(char::from(b'0' + fraction as u8));
    }
    out
}

/// Insert `,` every three digits.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short timestamp for status lines: `"Nov 18, 08:00"`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%b %-d, %H:%M").to_string()
}

/// Optional measurement with a unit, `"n/a"` when unknown.
pub fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{} {unit}", format_number(v)),
        None => "n/a".to_string(),
    }
}

/// Display label for a scenario key: `"ship_arrival"` → `"Ship Arrival"`.
pub fn label_for_scenario(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
