//! Request input validation.

use url::Url;

/// Validate a `key` or `tipo` path parameter: non-empty, bounded, and
/// restricted to `[A-Za-z0-9_-]`.
pub fn is_valid_param(value: &str, max_len: usize) -> bool {
    !value.is_empty()
        && value.len() <= max_len
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Validate a destination: bounded, whitespace-free, and a parseable
/// `http://` or `https://` URL.
pub fn is_valid_destino(value: &str, max_len: usize) -> bool {
    if value.is_empty() || value.len() > max_len {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    (value.starts_with("http://") || value.starts_with("https://"))
        && Url::parse(value).is_ok()
}
