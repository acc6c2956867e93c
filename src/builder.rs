//! Fluent configuration for a prompt session.

use crate::console::{Console, StdoutConsole};
use crate::engine::{PromptEngine, PromptHandle};
use crate::error::HandlerResult;
use crate::input::{KeyEvent, PromptInput, TerminalInput};
use std::time::Duration;

pub(crate) type KeyHandler = Box<dyn FnMut(&PromptHandle, KeyEvent) -> HandlerResult + Send>;
pub(crate) type LineHandler = Box<dyn FnMut(&PromptHandle, &str) -> HandlerResult + Send>;
pub(crate) type StartupAction = Box<dyn FnOnce(&PromptHandle) -> HandlerResult + Send>;

/// The active input mode. Key and line handlers are mutually exclusive by
/// construction: setting one replaces the whole mode.
pub(crate) enum Mode {
    Unset,
    Keys(KeyHandler),
    Lines(LineHandler),
}

/// Fluent, by-value configuration for a [`PromptEngine`].
///
/// Defaults: prompt text `" > "`, quit key `q`, quit line `"exit"`,
/// auto-refresh disabled, stdout console, terminal input. A session will
/// not run until exactly one of [`key_handler`](Self::key_handler) or
/// [`line_handler`](Self::line_handler) is set.
///
/// ```no_run
/// use promptline::PromptBuilder;
///
/// PromptBuilder::new()
///     .populate_prompt(|| "cmd > ".to_string())
///     .line_handler(|prompt, line| {
///         prompt.write_line(format!("you said: {line}"))?;
///         Ok(())
///     })
///     .quit_line("quit")
///     .build()
///     .run()
///     .unwrap();
/// ```
pub struct PromptBuilder {
    pub(crate) populate: Box<dyn Fn() -> String + Send + Sync>,
    pub(crate) on_startup: Option<StartupAction>,
    pub(crate) mode: Mode,
    pub(crate) quit_key: KeyEvent,
    pub(crate) quit_line: String,
    pub(crate) refresh_interval: Duration,
    pub(crate) console: Box<dyn Console>,
    pub(crate) input: Box<dyn PromptInput>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            populate: Box::new(|| " > ".to_string()),
            on_startup: None,
            mode: Mode::Unset,
            quit_key: KeyEvent::from('q'),
            quit_line: "exit".to_string(),
            refresh_interval: Duration::ZERO,
            console: Box::new(StdoutConsole::new()),
            input: Box::new(TerminalInput::new()),
        }
    }
}

impl PromptBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the function that computes the prompt text for every repaint.
    #[must_use]
    pub fn populate_prompt(mut self, populate: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.populate = Box::new(populate);
        self
    }

    /// Run an action once, right after the initial prompt render. Its
    /// failure is contained like a handler failure.
    #[must_use]
    pub fn on_startup(
        mut self,
        action: impl FnOnce(&PromptHandle) -> HandlerResult + Send + 'static,
    ) -> Self {
        self.on_startup = Some(Box::new(action));
        self
    }

    /// Dispatch per keystroke. Replaces any line handler.
    #[must_use]
    pub fn key_handler(
        mut self,
        handler: impl FnMut(&PromptHandle, KeyEvent) -> HandlerResult + Send + 'static,
    ) -> Self {
        self.mode = Mode::Keys(Box::new(handler));
        self
    }

    /// Dispatch per line. Replaces any key handler.
    #[must_use]
    pub fn line_handler(
        mut self,
        handler: impl FnMut(&PromptHandle, &str) -> HandlerResult + Send + 'static,
    ) -> Self {
        self.mode = Mode::Lines(Box::new(handler));
        self
    }

    /// The keystroke that quits the loop without reaching the handler.
    #[must_use]
    pub fn quit_key(mut self, key: impl Into<KeyEvent>) -> Self {
        self.quit_key = key.into();
        self
    }

    /// The line that quits the loop without reaching the handler.
    #[must_use]
    pub fn quit_line(mut self, line: impl Into<String>) -> Self {
        self.quit_line = line.into();
        self
    }

    /// Repaint the prompt automatically at this interval. Zero disables
    /// the refresh timer.
    #[must_use]
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Replace the display surface.
    #[must_use]
    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Replace the input source.
    #[must_use]
    pub fn input(mut self, input: impl PromptInput + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Assemble the engine. Configuration is immutable from here on.
    pub fn build(self) -> PromptEngine {
        PromptEngine::from_builder(self)
    }
}
