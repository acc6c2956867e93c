//! Rule-based styled console.
//!
//! A [`StyleSheet`] maps regular expressions to colors; the styled write
//! operations color every match and render the rest in the sheet's default
//! color. Styling is emitted as ANSI sequences through the wrapped console's
//! plain `write`, so any [`Console`] can sit underneath.

use super::{Console, StdoutConsole};
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use regex::Regex;
use std::io;
use std::ops::Range;

/// A default color plus ordered regex → color rules.
///
/// Rules are applied in insertion order; when matches overlap, the earlier
/// rule wins.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    default_color: Color,
    rules: Vec<(Regex, Color)>,
}

impl StyleSheet {
    /// Create a sheet that renders everything in `default_color`.
    pub const fn new(default_color: Color) -> Self {
        Self {
            default_color,
            rules: Vec::new(),
        }
    }

    /// Add a match rule. Chainable.
    #[must_use]
    pub fn rule(mut self, pattern: Regex, color: Color) -> Self {
        self.rules.push((pattern, color));
        self
    }

    /// The color used for text no rule matches.
    pub const fn default_color(&self) -> Color {
        self.default_color
    }

    /// Split `text` into colored spans covering the whole string.
    fn spans(&self, text: &str) -> Vec<(Range<usize>, Color)> {
        let mut claimed: Vec<Range<usize>> = Vec::new();
        let mut colored: Vec<(Range<usize>, Color)> = Vec::new();
        for (pattern, color) in &self.rules {
            for found in pattern.find_iter(text) {
                let range = found.range();
                if range.is_empty() {
                    continue;
                }
                let overlaps = claimed
                    .iter()
                    .any(|c| range.start < c.end && c.start < range.end);
                if !overlaps {
                    claimed.push(range.clone());
                    colored.push((range, *color));
                }
            }
        }
        colored.sort_by_key(|(range, _)| range.start);

        // Fill the gaps with the default color.
        let mut spans = Vec::new();
        let mut cursor = 0;
        for (range, color) in colored {
            if cursor < range.start {
                spans.push((cursor..range.start, self.default_color));
            }
            cursor = range.end;
            spans.push((range, color));
        }
        if cursor < text.len() {
            spans.push((cursor..text.len(), self.default_color));
        }
        spans
    }

    /// Render `text` with ANSI color sequences per the sheet's rules.
    fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 16);
        for (range, color) in self.spans(text) {
            out.push_str(&SetForegroundColor(color).to_string());
            out.push_str(&text[range]);
        }
        out.push_str(&ResetColor.to_string());
        out
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(Color::Green)
    }
}

/// A console that applies a [`StyleSheet`] to the styled write operations
/// and passes plain writes through untouched.
pub struct StyledConsole {
    inner: Box<dyn Console>,
    sheet: StyleSheet,
}

impl StyledConsole {
    /// Style writes to standard output with `sheet`.
    pub fn new(sheet: StyleSheet) -> Self {
        Self::over(StdoutConsole::new(), sheet)
    }

    /// Style writes to an arbitrary underlying console.
    pub fn over(inner: impl Console + 'static, sheet: StyleSheet) -> Self {
        Self {
            inner: Box::new(inner),
            sheet,
        }
    }

    /// Replace the stylesheet.
    pub fn set_sheet(&mut self, sheet: StyleSheet) {
        self.sheet = sheet;
    }
}

impl Console for StyledConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.inner.write(text)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_line(text)
    }

    fn write_styled(&mut self, text: &str) -> io::Result<()> {
        self.inner.write(&self.sheet.render(text))
    }

    fn write_line_styled(&mut self, text: &str) -> io::Result<()> {
        self.inner.write(&self.sheet.render(text))?;
        self.inner.write("\r\n")
    }
}
