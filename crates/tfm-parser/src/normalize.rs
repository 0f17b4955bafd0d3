//! Normalization helpers for comparing codes.

use std::cmp::Ordering;

/// Normalizes a code for equality comparison.
///
/// Uppercases and strips `.`, `-`, `_`, `/` and whitespace.
///
/// # Examples
///
/// ```
/// use tfm_parser::normalize_code;
///
/// assert_eq!(normalize_code("=360.001-rta 001/a"), "=360001RTA001A");
/// ```
pub fn normalize_code(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '_' | '/') && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Normalizes a code for mass-list matching.
///
/// Uppercases and strips `.`, `-`, `_` only. Slashes and spaces are kept.
pub fn normalize_registry_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Returns the leading 2-3 letters of a component code, uppercased.
///
/// Returns `None` if the code starts with fewer than two letters.
///
/// # Examples
///
/// ```
/// use tfm_parser::component_prefix;
///
/// assert_eq!(component_prefix("rta4001").as_deref(), Some("RTA"));
/// assert_eq!(component_prefix("KA12"), Some("KA".to_string()));
/// assert_eq!(component_prefix("X1"), None);
/// ```
pub fn component_prefix(code: &str) -> Option<String> {
    let letters = code
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    if letters < 2 {
        return None;
    }
    Some(code.trim()[..letters.min(3)].to_ascii_uppercase())
}

/// Orders code strings the way a root-locale collation would.
///
/// Punctuation and whitespace sort before digits, digits before letters.
/// Letters compare case-insensitively first; remaining ties put lowercase
/// before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| -> Vec<(u8, char)> {
        s.chars()
            .map(|c| {
                let class = if c.is_alphabetic() {
                    2
                } else if c.is_numeric() {
                    1
                } else {
                    0
                };
                (class, c.to_lowercase().next().unwrap_or(c))
            })
            .collect()
    };

    primary(a).cmp(&primary(b)).then_with(|| {
        for (ca, cb) in a.chars().zip(b.chars()) {
            if ca != cb {
                match (ca.is_lowercase(), cb.is_lowercase()) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => return ca.cmp(&cb),
                }
            }
        }
        a.len().cmp(&b.len())
    })
}
