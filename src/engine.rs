//! The input loop and the gate-protected write APIs.
//!
//! A running session owns one piece of mutable shared state, the renderer
//! behind the gate. The loop thread, the refresh timer and any number of
//! [`PromptHandle`] holders all serialize their terminal mutations through
//! it; no write ever interleaves with another.

use crate::builder::{Mode, PromptBuilder, StartupAction};
use crate::error::{HandlerResult, PromptError};
use crate::input::{KeyEvent, PromptInput};
use crate::render::Renderer;
use crate::timer::RefreshTimer;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use std::time::Duration;
use tracing::{debug, warn};

/// State shared between the loop thread, the refresh timer and write
/// handles: the prompt-text source and the gated renderer.
pub(crate) struct Shared {
    populate: Box<dyn Fn() -> String + Send + Sync>,
    renderer: Mutex<Renderer>,
}

impl Shared {
    pub(crate) fn new(
        populate: Box<dyn Fn() -> String + Send + Sync>,
        console: Box<dyn crate::console::Console>,
    ) -> Self {
        Self {
            populate,
            renderer: Mutex::new(Renderer::new(console)),
        }
    }

    /// Blocking acquire. A poisoned gate is recovered so release happens on
    /// every exit path even after a panic in a critical section.
    pub(crate) fn gate(&self) -> MutexGuard<'_, Renderer> {
        self.renderer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opportunistic acquire: `None` when the gate is held.
    pub(crate) fn try_gate(&self) -> Option<MutexGuard<'_, Renderer>> {
        match self.renderer.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }

    /// Recompute the current prompt text.
    pub(crate) fn prompt_text(&self) -> String {
        (self.populate)()
    }
}

/// A cloneable write handle into a prompt session.
///
/// Usable from any thread, including inside handlers; every operation takes
/// a blocking turn on the gate, so whole writes never interleave.
#[derive(Clone)]
pub struct PromptHandle {
    shared: Arc<Shared>,
}

impl PromptHandle {
    /// Acquire the gate and return the unlocked operations, for batching
    /// several writes under one acquisition.
    pub fn lock(&self) -> LockedPrompt<'_> {
        LockedPrompt {
            renderer: self.shared.gate(),
            shared: &self.shared,
        }
    }

    /// Erase and repaint the prompt with freshly computed text.
    pub fn redraw(&self) -> Result<(), PromptError> {
        self.lock().redraw()
    }

    /// Print a line "through" the live prompt: erase it, write the line on
    /// its own row, repaint the prompt underneath.
    pub fn write_line(&self, text: impl fmt::Display) -> Result<(), PromptError> {
        self.lock().write_line(text)
    }

    /// Write at `column`, `rows_up` rows above the prompt row, restoring
    /// the cursor afterwards. Fails with
    /// [`PromptError::InvalidPosition`] when `rows_up` is zero.
    pub fn write_at(&self, text: &str, column: u16, rows_up: u16) -> Result<(), PromptError> {
        self.lock().write_at(text, column, rows_up)
    }
}

/// The write operations with the gate already held.
///
/// Returned by [`PromptHandle::lock`]; the gate is released when this guard
/// drops, on success and failure alike.
pub struct LockedPrompt<'a> {
    renderer: MutexGuard<'a, Renderer>,
    shared: &'a Shared,
}

impl LockedPrompt<'_> {
    /// Unlocked variant of [`PromptHandle::redraw`].
    pub fn redraw(&mut self) -> Result<(), PromptError> {
        let prompt = self.shared.prompt_text();
        self.renderer.redraw(&prompt)
    }

    /// Unlocked variant of [`PromptHandle::write_line`].
    pub fn write_line(&mut self, text: impl fmt::Display) -> Result<(), PromptError> {
        let prompt = self.shared.prompt_text();
        self.renderer.write_line(&text.to_string(), &prompt)
    }

    /// Unlocked variant of [`PromptHandle::write_at`].
    pub fn write_at(&mut self, text: &str, column: u16, rows_up: u16) -> Result<(), PromptError> {
        self.renderer.write_at(text, column, rows_up)
    }

    /// Display width of the current prompt region.
    pub fn rendered_width(&self) -> usize {
        self.renderer.rendered_width()
    }

    pub(crate) fn reset(&mut self) {
        self.renderer.reset();
    }
}

/// A configured prompt session, ready to run.
///
/// Built by [`PromptBuilder::build`](crate::PromptBuilder::build). Running
/// consumes the engine; every session starts from a fresh render state.
///
/// ```
/// use promptline::{CaptureConsole, PromptBuilder, ScriptedInput};
///
/// let capture = CaptureConsole::new();
/// PromptBuilder::new()
///     .line_handler(|_, _| Ok(()))
///     .console(capture.clone())
///     .input(ScriptedInput::new("exit"))
///     .build()
///     .run()
///     .unwrap();
/// assert_eq!(capture.printed(), " > ");
/// ```
pub struct PromptEngine {
    shared: Arc<Shared>,
    mode: Mode,
    on_startup: Option<StartupAction>,
    quit_key: KeyEvent,
    quit_line: String,
    refresh_interval: Duration,
    input: Box<dyn PromptInput>,
}

impl PromptEngine {
    pub(crate) fn from_builder(builder: PromptBuilder) -> Self {
        Self {
            shared: Arc::new(Shared::new(builder.populate, builder.console)),
            mode: builder.mode,
            on_startup: builder.on_startup,
            quit_key: builder.quit_key,
            quit_line: builder.quit_line,
            refresh_interval: builder.refresh_interval,
            input: builder.input,
        }
    }

    /// A write handle for other threads. Valid for the whole session; after
    /// the loop quits it keeps working as a plain serialized writer.
    pub fn handle(&self) -> PromptHandle {
        PromptHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Run the input loop until a quit condition is met.
    ///
    /// Renders the initial prompt, fires the startup action, arms the
    /// refresh timer if configured, then blocks reading keys or lines per
    /// the configured mode, dispatching each to the handler and repainting
    /// after every dispatch. Returns when the quit key/line arrives or the
    /// input source ends.
    ///
    /// Handler failures never surface here; they are reported as a single
    /// diagnostic line and the loop keeps going. Configuration, display and
    /// input-source errors do surface.
    pub fn run(mut self) -> Result<(), PromptError> {
        if matches!(self.mode, Mode::Unset) {
            return Err(PromptError::NoHandler);
        }

        let handle = self.handle();
        handle.lock().reset();
        handle.redraw()?;
        debug!("prompt session started");

        if let Some(action) = self.on_startup.take() {
            contain(&handle, "startup action", action(&handle));
        }

        let timer = (!self.refresh_interval.is_zero())
            .then(|| RefreshTimer::spawn(self.refresh_interval, Arc::clone(&self.shared)));

        let result = drive(
            &mut self.mode,
            self.input.as_mut(),
            &handle,
            self.quit_key,
            &self.quit_line,
        );

        if let Some(timer) = timer {
            timer.join();
        }
        debug!("prompt session quit");
        result
    }
}

/// The read/dispatch/redraw cycle for the configured mode.
fn drive(
    mode: &mut Mode,
    input: &mut dyn PromptInput,
    handle: &PromptHandle,
    quit_key: KeyEvent,
    quit_line: &str,
) -> Result<(), PromptError> {
    match mode {
        Mode::Unset => Err(PromptError::NoHandler),
        Mode::Keys(handler) => loop {
            match input.read_key().map_err(PromptError::Input)? {
                None => return Ok(()),
                Some(key) if key == quit_key => {
                    debug!("quit key received");
                    return Ok(());
                }
                Some(key) => {
                    contain(handle, "key handler", handler(handle, key));
                    handle.redraw()?;
                }
            }
        },
        Mode::Lines(handler) => loop {
            match input.read_line().map_err(PromptError::Input)? {
                None => return Ok(()),
                Some(line) if line == quit_line => {
                    debug!("quit line received");
                    return Ok(());
                }
                Some(line) => {
                    contain(handle, "line handler", handler(handle, &line));
                    handle.redraw()?;
                }
            }
        },
    }
}

/// Failure containment boundary: a handler error becomes one diagnostic
/// line through the live prompt and the loop carries on.
fn contain(handle: &PromptHandle, source: &str, outcome: HandlerResult) {
    if let Err(err) = outcome {
        warn!(source, error = %err, "handler failure contained");
        let _ = handle.write_line(format_args!("Unhandled Exception: {source} - {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaptureConsole;
    use std::thread;

    #[test]
    fn test_handle_write_line_repaints_prompt() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| " > ".to_string()),
            Box::new(capture.clone()),
        ));
        let handle = PromptHandle {
            shared: Arc::clone(&shared),
        };
        handle.redraw().unwrap();
        handle.write_line("progress 50%").unwrap();
        assert_eq!(capture.printed(), " > progress 50%\r\n > ");
    }

    #[test]
    fn test_concurrent_writes_never_interleave() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(String::new),
            Box::new(capture.clone()),
        ));
        let handle = PromptHandle { shared };

        let mut workers = Vec::new();
        for worker in 0..4 {
            let handle = handle.clone();
            workers.push(thread::spawn(move || {
                for i in 0..25 {
                    handle.write_line(format_args!("w{worker}-{i}")).unwrap();
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        // With an empty prompt, every write_line emits exactly one whole
        // line; interleaving would tear them.
        let output = capture.printed();
        let mut count = 0;
        for line in output.split("\r\n").filter(|l| !l.is_empty()) {
            assert!(line.starts_with('w') && line.contains('-'), "torn line: {line:?}");
            count += 1;
        }
        assert_eq!(count, 100);
    }

    #[test]
    fn test_locked_prompt_batches_under_one_acquisition() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| ">".to_string()),
            Box::new(capture.clone()),
        ));
        let handle = PromptHandle { shared };
        let mut locked = handle.lock();
        locked.write_line("a").unwrap();
        locked.write_line("b").unwrap();
        drop(locked);
        assert_eq!(capture.printed(), "a\r\n>b\r\n>");
    }

    #[test]
    fn test_write_at_error_releases_gate() {
        let capture = CaptureConsole::new();
        let shared = Arc::new(Shared::new(
            Box::new(|| ">".to_string()),
            Box::new(capture.clone()),
        ));
        let handle = PromptHandle { shared };
        assert!(handle.write_at("x", 0, 0).is_err());
        // The gate must be free again.
        handle.redraw().unwrap();
        assert_eq!(capture.printed(), ">");
    }
}
