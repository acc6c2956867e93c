//! Input sources: key and line reads the loop blocks on.
//!
//! The engine reads through the [`PromptInput`] trait so sessions can be
//! driven by the real terminal or by a scripted transcript in tests.

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Key codes the engine understands.
///
/// A simplified subset of crossterm's key codes; anything outside it is
/// ignored by the terminal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// A single keystroke: code plus modifiers.
///
/// Equality is exact, which is what quit-key detection relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the keypress.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// A keystroke with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

/// A blocking source of keystrokes and lines.
///
/// `Ok(None)` means the source is exhausted; the loop treats it like a quit
/// condition.
pub trait PromptInput: Send {
    /// Block until one keystroke is available.
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Block until one full line is available. The trailing newline is
    /// stripped.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// The real terminal: lines from stdin, keystrokes from crossterm events.
///
/// Raw mode is enabled lazily on the first key read (per-keystroke input
/// needs it) and restored when the source is dropped. Line reads leave the
/// terminal mode alone.
#[derive(Debug, Default)]
pub struct TerminalInput {
    raw_mode: bool,
}

impl TerminalInput {
    /// Create a terminal input source.
    pub const fn new() -> Self {
        Self { raw_mode: false }
    }

    /// Convert a crossterm key code, dropping anything outside our subset.
    fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
        Some(match code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::F(n) => KeyCode::F(n),
            event::KeyCode::Backspace => KeyCode::Backspace,
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Left => KeyCode::Left,
            event::KeyCode::Right => KeyCode::Right,
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            event::KeyCode::Home => KeyCode::Home,
            event::KeyCode::End => KeyCode::End,
            event::KeyCode::PageUp => KeyCode::PageUp,
            event::KeyCode::PageDown => KeyCode::PageDown,
            event::KeyCode::Tab => KeyCode::Tab,
            event::KeyCode::BackTab => KeyCode::BackTab,
            event::KeyCode::Delete => KeyCode::Delete,
            event::KeyCode::Insert => KeyCode::Insert,
            event::KeyCode::Esc => KeyCode::Esc,
            _ => return None,
        })
    }

    fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
        KeyModifiers {
            shift: mods.contains(event::KeyModifiers::SHIFT),
            control: mods.contains(event::KeyModifiers::CONTROL),
            alt: mods.contains(event::KeyModifiers::ALT),
        }
    }
}

impl PromptInput for TerminalInput {
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if !self.raw_mode {
            terminal::enable_raw_mode()?;
            self.raw_mode = true;
        }
        loop {
            // Only key press events count; releases, repeats, mouse and
            // resize events are skipped.
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(code) = Self::convert_key_code(key.code) {
                    return Ok(Some(KeyEvent {
                        code,
                        modifiers: Self::convert_modifiers(key.modifiers),
                    }));
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// A scripted input source for tests and demos.
///
/// Feeds a fixed transcript: line reads consume up to each newline, key
/// reads consume one character at a time (`'\n'` becomes
/// [`KeyCode::Enter`]). Once the transcript is exhausted every read returns
/// `None`.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    pending: VecDeque<char>,
}

impl ScriptedInput {
    /// Create a source that replays `transcript`.
    pub fn new(transcript: &str) -> Self {
        Self {
            pending: transcript.chars().collect(),
        }
    }
}

impl PromptInput for ScriptedInput {
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        Ok(self.pending.pop_front().map(|c| {
            if c == '\n' {
                KeyEvent::plain(KeyCode::Enter)
            } else {
                KeyEvent::from(c)
            }
        }))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        let mut line = String::new();
        while let Some(c) = self.pending.pop_front() {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_lines() {
        let mut input = ScriptedInput::new("one\ntwo\n");
        assert_eq!(input.read_line().unwrap(), Some("one".to_string()));
        assert_eq!(input.read_line().unwrap(), Some("two".to_string()));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_scripted_final_line_without_newline() {
        let mut input = ScriptedInput::new("exit");
        assert_eq!(input.read_line().unwrap(), Some("exit".to_string()));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_scripted_keys() {
        let mut input = ScriptedInput::new("a\n");
        assert_eq!(input.read_key().unwrap(), Some(KeyEvent::from('a')));
        assert_eq!(
            input.read_key().unwrap(),
            Some(KeyEvent::plain(KeyCode::Enter))
        );
        assert_eq!(input.read_key().unwrap(), None);
    }

    #[test]
    fn test_key_event_equality_includes_modifiers() {
        let plain = KeyEvent::from('q');
        let shifted = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers {
                shift: true,
                ..KeyModifiers::NONE
            },
        };
        assert_ne!(plain, shifted);
        assert_eq!(plain, KeyEvent::plain(KeyCode::Char('q')));
    }
}
