// crates/streamcut-ui/src/helpers/format.rs
//
// Small text-formatting helpers shared by the panels.

/// Truncate `s` to at most `max` bytes, never splitting a codepoint.
///
/// Used by the library card grid to keep asset titles from overflowing
/// their fixed-width tiles.
///
/// Note: `max` is a *byte* count. For ASCII titles (the common case) bytes
/// and characters are equivalent; for multibyte titles the result may be
/// shorter than `max` characters but always lands on a boundary.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Whole-number percentage for progress labels. Zero totals (an upload
/// whose size is still unknown) read as 0% rather than dividing by zero.
pub fn percent(sent: u64, total: u64) -> String {
    if total == 0 {
        return "0%".into();
    }
    format!("{}%", (sent as f64 / total as f64 * 100.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_unchanged() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5),  "hello");
    }

    #[test]
    fn long_ascii_is_clipped() {
        assert_eq!(truncate("hello world", 5), "hello");
    }

    #[test]
    fn empty_input() {
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn multibyte_never_splits() {
        // Each é is two bytes; a cut landing mid-codepoint steps back.
        let s = "ééééé";
        let t = truncate(s, 5);
        assert!(s.starts_with(t));
        assert!(t.len() <= 6);
        assert!(std::str::from_utf8(t.as_bytes()).is_ok());
    }

    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(0, 0),      "0%");
        assert_eq!(percent(512, 1024), "50%");
        assert_eq!(percent(1, 3),      "33%");
        assert_eq!(percent(1024, 1024), "100%");
    }
}
