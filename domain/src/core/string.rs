//! String helpers for displaying questions and answers on one line.

/// Truncate a string to a maximum byte length with ellipsis (UTF-8 safe)
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len.saturating_sub(3).min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Collapse all whitespace runs (including newlines) into single spaces
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One-line preview of `s`, at most `max_len` bytes
pub fn preview(s: &str, max_len: usize) -> String {
    truncate(&single_line(s), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous boundary
        assert_eq!(truncate("ééééé", 6), "é...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("What about\n  Bank A?\r\n"), "What about Bank A?");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("line one\nline two", 12), "line one ...");
    }
}
