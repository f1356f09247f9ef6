//! Free-text response parsing.
//!
//! The generation API is asked for a numbered list but nothing enforces it,
//! so parsing is line based and tolerant of malformed numbering.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<ascii digits>.<optional whitespace><rest>`
static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.\s*(.*)$").expect("valid numbered-line pattern"));

static DIGITS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits-only pattern"));

/// Unnumbered lines must be strictly longer than this (in characters) to count.
pub const FALLBACK_MIN_CHARS: usize = 5;

/// Split a model response into suggestions, preserving line order.
///
/// Lines are trimmed and blank ones skipped. A numbered line contributes
/// its text after the number; any other line longer than
/// [`FALLBACK_MIN_CHARS`] that is not just digits is taken whole.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<String> {
    if let Some(rest) = NUMBERED_LINE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|rest| !rest.is_empty())
    {
        return Some(rest.to_string());
    }

    if line.chars().count() > FALLBACK_MIN_CHARS && !DIGITS_ONLY.is_match(line) {
        return Some(line.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list() {
        assert_eq!(
            parse_suggestions("1. Foo\n2. Bar\n3. Baz"),
            vec!["Foo", "Bar", "Baz"]
        );
    }

    #[test]
    fn test_stray_digit_line_is_dropped() {
        assert_eq!(parse_suggestions("1. Foo\n2\n3. Baz"), vec!["Foo", "Baz"]);
    }

    #[test]
    fn test_unnumbered_long_line_is_kept_verbatim() {
        assert_eq!(
            parse_suggestions("Please describe the bug in detail"),
            vec!["Please describe the bug in detail"]
        );
    }

    #[test]
    fn test_short_unnumbered_lines_are_dropped() {
        assert!(parse_suggestions("Sure!\nok\n12345").is_empty());
        // exactly five characters is not enough
        assert!(parse_suggestions("abcde").is_empty());
        assert_eq!(parse_suggestions("abcdef"), vec!["abcdef"]);
    }

    #[test]
    fn test_long_digit_only_line_is_dropped() {
        assert!(parse_suggestions("1234567890").is_empty());
    }

    #[test]
    fn test_blank_response() {
        assert!(parse_suggestions("").is_empty());
        assert!(parse_suggestions("  \n\t\n  ").is_empty());
    }

    #[test]
    fn test_whitespace_and_crlf_are_trimmed() {
        assert_eq!(
            parse_suggestions("\r\n  1.   Foo bar  \r\n\r\n2.Baz\r\n"),
            vec!["Foo bar", "Baz"]
        );
    }

    #[test]
    fn test_number_without_text_falls_back() {
        // "1." alone is too short for the fallback; a long number-dot is kept whole
        assert!(parse_suggestions("1.").is_empty());
        assert_eq!(parse_suggestions("123456."), vec!["123456."]);
    }

    #[test]
    fn test_mixed_commentary_is_kept_in_order() {
        let raw = "Here are three options:\n1. A\n2. B";
        assert_eq!(parse_suggestions(raw), vec!["Here are three options:", "A", "B"]);
    }

    #[test]
    fn test_no_dedup() {
        assert_eq!(parse_suggestions("1. Same\n2. Same"), vec!["Same", "Same"]);
    }

    #[test]
    fn test_other_list_markers_use_fallback() {
        assert_eq!(
            parse_suggestions("- first idea\n1) second"),
            vec!["- first idea", "1) second"]
        );
    }

    #[test]
    fn test_fallback_counts_characters_not_bytes() {
        // 5 multi-byte characters: not long enough
        assert!(parse_suggestions("改善案です").is_empty());
        assert_eq!(parse_suggestions("改善案を示す。"), vec!["改善案を示す。"]);
    }
}
