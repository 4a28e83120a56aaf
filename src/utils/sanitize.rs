//! Utilities for sanitizing diagnostic messages.
//!
//! Error chains can carry text from remote servers (status lines, decoder
//! excerpts). Before such a message is written as a diagnostic it is folded
//! onto a single line and truncated.

use crate::config::MAX_DIAGNOSTIC_LENGTH;

/// Folds a message onto one line.
///
/// Every control character (including newline, tab and carriage return) is
/// replaced by a space, and runs of whitespace collapse to a single space.
///
/// # Arguments
///
/// * `message` - The message to sanitize
pub fn sanitize_diagnostic_message(message: &str) -> String {
    let replaced: String = message
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitizes and truncates a diagnostic message to `MAX_DIAGNOSTIC_LENGTH` bytes.
///
/// Truncation happens on a character boundary and appends a note with the
/// original length.
pub fn sanitize_and_truncate_diagnostic(message: &str) -> String {
    let sanitized = sanitize_diagnostic_message(message);

    if sanitized.len() > MAX_DIAGNOSTIC_LENGTH {
        // Leave room for the truncation note
        let budget = MAX_DIAGNOSTIC_LENGTH.saturating_sub(50);
        let cut = sanitized
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|&i| i <= budget)
            .last()
            .unwrap_or(0);
        format!(
            "{}... (truncated, original length: {} chars)",
            &sanitized[..cut],
            sanitized.chars().count()
        )
    } else {
        sanitized
    }
}
