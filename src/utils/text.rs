//! Text sanitization and truncation.

/// Strip control characters that would break downstream JSON encoding.
///
/// Keeps `\n`, `\r`, and `\t`; removes null bytes and all other control
/// characters.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\r' || c == '\t')
        .collect()
}

/// Truncate a string to at most `max_chars` characters, at a char boundary.
///
/// Truncation is a contract, never an error: output caps and query caps are
/// applied with this.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_null_bytes() {
        assert_eq!(sanitize("ab\0cd"), "abcd");
    }

    #[test]
    fn test_sanitize_keeps_whitespace_controls() {
        assert_eq!(sanitize("a\nb\tc\rd"), "a\nb\tc\rd");
    }

    #[test]
    fn test_sanitize_removes_other_controls() {
        assert_eq!(sanitize("a\x01b\x1bc\x7fd"), "abcd");
    }

    #[test]
    fn test_sanitize_passthrough() {
        let text = "plain text with unicode: héllo 世界";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_truncate_shorter_than_cap() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_at_cap() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        // Each char is multi-byte; a byte slice at 5 would panic
        let text = "日本語テキスト";
        assert_eq!(truncate_chars(text, 3), "日本語");
    }

    #[test]
    fn test_truncate_zero() {
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
