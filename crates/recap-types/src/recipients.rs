//! Recipient list normalization.

/// Trim each entry and drop blanks, keeping order.
pub fn normalize_recipients<S: AsRef<str>>(to: &[S]) -> Vec<String> {
    to.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
