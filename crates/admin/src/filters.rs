//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Format an amount as yen with thousands separators.
///
/// Usage in templates: `{{ order.total_amount|yen }}` renders `¥12,500`.
#[askama::filter_fn]
pub fn yen(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("¥{}", group_thousands(&value.to_string())))
}

/// Insert commas every three digits of the leading integer part.
fn group_thousands(raw: &str) -> String {
    let (sign, rest) = raw
        .strip_prefix('-')
        .map_or(("", raw), |rest| ("-", rest));
    let split = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(split);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{tail}")
}
