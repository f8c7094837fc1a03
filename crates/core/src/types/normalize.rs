//! Normalization for operator-entered postal codes and phone numbers.
//!
//! Both helpers strip every non-digit and reformat when the digit count is
//! a known Japanese shape. Anything else is returned unchanged so the
//! operator sees exactly what they typed.

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize a postal code to `NNN-NNNN` when it has exactly seven digits.
///
/// ```
/// use protein_admin_core::normalize_postal_code;
///
/// assert_eq!(normalize_postal_code("1000001"), "100-0001");
/// assert_eq!(normalize_postal_code("〒100 0001"), "100-0001");
/// assert_eq!(normalize_postal_code("12345"), "12345");
/// ```
#[must_use]
pub fn normalize_postal_code(value: &str) -> String {
    let d = digits(value);
    match (d.get(..3), d.get(3..)) {
        (Some(head), Some(tail)) if d.len() == 7 => format!("{head}-{tail}"),
        _ => value.to_string(),
    }
}

/// Normalize a phone number.
///
/// Eleven digits become `NNN-NNNN-NNNN` (mobile), ten digits become
/// `NNN-NNN-NNNN`. Other lengths are returned unchanged.
///
/// ```
/// use protein_admin_core::normalize_phone;
///
/// assert_eq!(normalize_phone("09011112222"), "090-1111-2222");
/// assert_eq!(normalize_phone("0312345678"), "031-234-5678");
/// ```
#[must_use]
pub fn normalize_phone(value: &str) -> String {
    let d = digits(value);
    let split = match d.len() {
        11 => Some((3, 7)),
        10 => Some((3, 6)),
        _ => None,
    };
    split
        .and_then(|(a, b)| Some(format!("{}-{}-{}", d.get(..a)?, d.get(a..b)?, d.get(b..)?)))
        .unwrap_or_else(|| value.to_string())
}
