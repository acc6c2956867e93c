//! The redraw engine: in-place erase and repaint of the prompt region.
//!
//! The renderer tracks a single datum, the display width of the last
//! rendered prompt region, and uses only relative cursor motion (backspaces
//! and DEC save/restore), so it composes with whatever the terminal already
//! shows. All mutation happens while the caller holds the gate.

use crate::console::Console;
use crate::error::PromptError;
use crate::text::{display_width, pad_to_width};
use std::fmt::Write as _;

/// Erases and repaints the prompt region on a [`Console`].
pub(crate) struct Renderer {
    console: Box<dyn Console>,
    /// Display width of the last rendered region, padding included.
    last_len: usize,
}

impl Renderer {
    pub(crate) fn new(console: Box<dyn Console>) -> Self {
        Self {
            console,
            last_len: 0,
        }
    }

    /// Width of the current prompt region.
    pub(crate) const fn rendered_width(&self) -> usize {
        self.last_len
    }

    /// Forget the current region. The next redraw starts from column zero
    /// of wherever the cursor is.
    pub(crate) fn reset(&mut self) {
        self.last_len = 0;
    }

    /// Move the cursor back to the start of the prompt region.
    fn erase(&mut self) -> Result<(), PromptError> {
        if self.last_len == 0 {
            return Ok(());
        }
        let motion = "\u{8}".repeat(self.last_len);
        self.console.write(&motion)?;
        Ok(())
    }

    /// Erase the previous prompt and draw `text` in its place.
    ///
    /// The new text is right-padded with spaces to blank out any leftover
    /// columns from a wider previous render, and trailing backspaces bring
    /// the cursor back to the end of the visible text. `last_len` becomes
    /// the padded width, so the next redraw knows how much to clear.
    pub(crate) fn redraw(&mut self, text: &str) -> Result<(), PromptError> {
        self.erase()?;
        let width = display_width(text);
        let padded = pad_to_width(text, self.last_len);
        let padded_width = display_width(&padded);
        let back = self.last_len.saturating_sub(width);
        let mut frame = padded;
        for _ in 0..back {
            frame.push('\u{8}');
        }
        self.console.write_styled(&frame)?;
        self.last_len = padded_width;
        Ok(())
    }

    /// Erase the prompt, write `line` on its own row, and repaint `prompt`.
    ///
    /// The line is padded to cover the old region before the newline. A
    /// newline invalidates the in-place erase assumption, so the region
    /// width resets before the repaint.
    pub(crate) fn write_line(&mut self, line: &str, prompt: &str) -> Result<(), PromptError> {
        self.erase()?;
        let padded = pad_to_width(line, self.last_len);
        self.console.write_line_styled(&padded)?;
        self.last_len = 0;
        self.redraw(prompt)
    }

    /// Write `text` at `column`, `rows_up` rows above the prompt row,
    /// restoring the cursor afterwards.
    ///
    /// `rows_up` must be at least one: row zero is the prompt region itself.
    pub(crate) fn write_at(
        &mut self,
        text: &str,
        column: u16,
        rows_up: u16,
    ) -> Result<(), PromptError> {
        if rows_up == 0 {
            return Err(PromptError::InvalidPosition { column, rows_up });
        }
        // DEC save, relative motion up, absolute column (1-based), DEC restore.
        let mut motion = String::new();
        let _ = write!(motion, "\u{1b}7\u{1b}[{rows_up}A\u{1b}[{}G", u32::from(column) + 1);
        self.console.write(&motion)?;
        self.console.write_styled(text)?;
        self.console.write("\u{1b}8")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaptureConsole;
    use pretty_assertions::assert_eq;

    fn renderer(capture: &CaptureConsole) -> Renderer {
        Renderer::new(Box::new(capture.clone()))
    }

    #[test]
    fn test_first_redraw_has_no_motion() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw(" > ").unwrap();
        assert_eq!(capture.contents(), " > ");
        assert_eq!(r.rendered_width(), 3);
    }

    #[test]
    fn test_redraw_same_text_is_idempotent() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw(" > ").unwrap();
        let width_once = r.rendered_width();
        capture.clear();

        r.redraw(" > ").unwrap();
        assert_eq!(r.rendered_width(), width_once);
        // Erase motion plus the identical text, nothing else.
        assert_eq!(capture.contents(), "\u{8}\u{8}\u{8} > ");
        assert_eq!(capture.printed(), " > ");
    }

    #[test]
    fn test_redraw_shorter_text_blanks_leftovers() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw("12345").unwrap();
        capture.clear();

        r.redraw("ab").unwrap();
        // Five backspaces, "ab" padded to five columns, three backspaces to
        // park the cursor after "ab".
        assert_eq!(capture.contents(), "\u{8}\u{8}\u{8}\u{8}\u{8}ab   \u{8}\u{8}\u{8}");
        // The region stays at the padded width.
        assert_eq!(r.rendered_width(), 5);
    }

    #[test]
    fn test_redraw_longer_text_skips_back_pad() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw("ab").unwrap();
        capture.clear();

        r.redraw("12345").unwrap();
        assert_eq!(capture.contents(), "\u{8}\u{8}12345");
        assert_eq!(r.rendered_width(), 5);
    }

    #[test]
    fn test_write_line_resets_then_repaints() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw(" > ").unwrap();
        capture.clear();

        r.write_line("testline", " > ").unwrap();
        assert_eq!(capture.printed(), "testline\r\n > ");
        assert_eq!(r.rendered_width(), 3);
    }

    #[test]
    fn test_write_line_pads_short_output_over_wide_region() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw("long prompt>").unwrap();
        capture.clear();

        r.write_line("ok", ">").unwrap();
        // "ok" is padded to the twelve-column region before the newline.
        assert_eq!(capture.printed(), "ok          \r\n>");
    }

    #[test]
    fn test_reset_forgets_region() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw("12345").unwrap();
        r.reset();
        capture.clear();

        r.redraw("ab").unwrap();
        assert_eq!(capture.contents(), "ab");
        assert_eq!(r.rendered_width(), 2);
    }

    #[test]
    fn test_write_at_rejects_row_zero() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        let err = r.write_at("x", 0, 0).unwrap_err();
        assert!(matches!(err, PromptError::InvalidPosition { .. }));
        assert_eq!(capture.contents(), "");
    }

    #[test]
    fn test_write_at_saves_and_restores_cursor() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.write_at("status", 4, 2).unwrap();
        assert_eq!(capture.contents(), "\u{1b}7\u{1b}[2A\u{1b}[5Gstatus\u{1b}8");
    }

    #[test]
    fn test_wide_glyph_prompt_erases_by_columns() {
        let capture = CaptureConsole::new();
        let mut r = renderer(&capture);
        r.redraw("日>").unwrap();
        assert_eq!(r.rendered_width(), 3);
        capture.clear();

        r.redraw(">").unwrap();
        // Three columns of motion for the three-column region, then ">"
        // padded to three columns and two backspaces to park the cursor.
        assert_eq!(capture.contents(), "\u{8}\u{8}\u{8}>  \u{8}\u{8}");
    }
}
