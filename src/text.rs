//! Text formatting utilities shared by the renderer and the tile grid.
//!
//! All widths are *display* widths (terminal columns), not byte or char
//! counts, so padding stays correct for non-ASCII prompts.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthStr, UnicodeWidthChar};

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Right-pad `text` with spaces to at least `width` columns.
///
/// Text already at or beyond `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + (width - current));
    padded.push_str(text);
    for _ in current..width {
        padded.push(' ');
    }
    padded
}

/// Greedily word-wrap `text` into lines of at most `width` columns,
/// producing at most `max_lines` lines.
///
/// Words are split on whitespace; a single word wider than `width` gets a
/// line of its own rather than being split mid-word.
pub fn wrap_to_width(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if max_lines == 0 {
        return lines;
    }
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty()
            && display_width(&current) + 1 + display_width(word) > width
        {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                return lines;
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate `text` to at most `width` columns without splitting a grapheme.
pub fn truncate_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for grapheme in text.graphemes(true) {
        let w = grapheme
            .chars()
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
            .sum::<usize>();
        if used + w > width {
            break;
        }
        used += w;
        end += grapheme.len();
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_shorter() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
    }

    #[test]
    fn test_pad_already_wide() {
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_pad_wide_glyphs() {
        // "日" is two columns, so only one extra space is needed.
        assert_eq!(pad_to_width("日", 3), "日 ");
    }

    #[test]
    fn test_wrap_basic() {
        let lines = wrap_to_width("the quick brown fox jumps", 10, usize::MAX);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_respects_max_lines() {
        let lines = wrap_to_width("a b c d e f g h", 3, 2);
        assert_eq!(lines, vec!["a b", "c d"]);
    }

    #[test]
    fn test_wrap_overlong_word() {
        let lines = wrap_to_width("hi extraordinarily so", 6, usize::MAX);
        assert_eq!(lines, vec!["hi", "extraordinarily", "so"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_to_width("", 10, usize::MAX).is_empty());
        assert!(wrap_to_width("anything", 10, 0).is_empty());
    }

    #[test]
    fn test_truncate_plain() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("hi", 10), "hi");
    }

    #[test]
    fn test_truncate_does_not_split_wide_glyph() {
        // Two-column glyph cannot fit in the last single column.
        assert_eq!(truncate_to_width("a日b", 2), "a");
        assert_eq!(truncate_to_width("a日b", 3), "a日");
    }
}
