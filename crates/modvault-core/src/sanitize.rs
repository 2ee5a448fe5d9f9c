//! Text normalization for storage
//!
//! SQLite TEXT columns treat NUL as a string terminator, so free-text
//! content (readme and license bodies) is stripped of NUL characters
//! before it is written.

/// Remove NUL characters from free-text content
pub fn sanitize_text(s: &str) -> String {
    if !s.contains('\0') {
        return s.to_string();
    }
    s.chars().filter(|&c| c != '\0').collect()
}
