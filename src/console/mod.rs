//! Display surfaces the prompt engine writes through.
//!
//! The engine never talks to stdout directly; everything goes through the
//! [`Console`] trait so output can be styled, captured, or redirected.

mod capture;
mod plain;
mod styled;

pub use capture::CaptureConsole;
pub use plain::StdoutConsole;
pub use styled::{StyleSheet, StyledConsole};

use std::io;

/// A terminal-like surface with plain and styled write operations.
///
/// `write_line` and `write_line_styled` append `"\r\n"`: the engine may be
/// running with the terminal in raw mode, where a bare `\n` does not return
/// the carriage.
///
/// The styled operations default to the plain ones, so a minimal
/// implementation only supplies [`write`](Console::write).
pub trait Console: Send {
    /// Write text without a trailing newline.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write text followed by `"\r\n"`.
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\r\n")
    }

    /// Write text with styling applied.
    fn write_styled(&mut self, text: &str) -> io::Result<()> {
        self.write(text)
    }

    /// Write styled text followed by `"\r\n"`.
    fn write_line_styled(&mut self, text: &str) -> io::Result<()> {
        self.write_styled(text)?;
        self.write("\r\n")
    }
}
