//! Input utilities for the terminal interface.

/// Sanitize pasted text before it enters the single-line input buffer.
///
/// This function:
/// - Converts tabs to 4 spaces
/// - Converts newlines and carriage returns to single spaces
/// - Filters out all other control characters
///
/// The input area holds one line; a pasted multi-line query flattens into
/// one query rather than triggering a submit per line.
pub fn sanitize_text_input(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' | '\n' => sanitized.push(' '),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}
