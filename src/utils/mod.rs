//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

/// Truncate text to a maximum number of characters
///
/// Text longer than `max_len` is cut to `max_len - 3` characters and
/// suffixed with `...`. Counts characters, not bytes, so multi-byte titles
/// never split inside a code point.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Byte-safe prefix of `text` for log lines
pub fn log_preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
