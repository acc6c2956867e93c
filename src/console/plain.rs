//! Plain passthrough console over standard output.

use super::Console;
use std::io::{self, Write};

/// The default console: a direct passthrough to standard output.
///
/// Every call flushes, so a redraw is visible before the engine goes back to
/// blocking on input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl StdoutConsole {
    /// Create a stdout console.
    pub const fn new() -> Self {
        Self
    }
}

impl Console for StdoutConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}
