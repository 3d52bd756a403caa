//! Small string helpers shared by the client and the pipeline.

/// Leading `max_chars` characters of `s`, split on a char boundary.
///
/// Used to keep error messages and diagnostic excerpts bounded.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
