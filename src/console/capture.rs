//! In-memory console for tests and golden-output capture.

use super::Console;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

/// A console that appends everything to a shared in-memory buffer.
///
/// Clones share the same buffer, so a test can hand one clone to the engine
/// and inspect the other after the loop quits:
///
/// ```
/// use promptline::{CaptureConsole, Console};
///
/// let capture = CaptureConsole::new();
/// let mut surface = capture.clone();
/// surface.write("hi").unwrap();
/// assert_eq!(capture.contents(), "hi");
/// ```
#[derive(Debug, Default, Clone)]
pub struct CaptureConsole {
    buffer: Arc<Mutex<String>>,
}

impl CaptureConsole {
    /// Create an empty capture console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, including backspace motion characters.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Contents with backspace motion stripped, leaving only the characters
    /// that were ever emitted. Handy for asserting against redraw output.
    pub fn printed(&self) -> String {
        self.contents().replace('\u{8}', "")
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Console for CaptureConsole {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_str(text);
        Ok(())
    }
}
