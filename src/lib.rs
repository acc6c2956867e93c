//! # Promptline
//!
//! A self-redrawing interactive prompt engine for blocking terminal input
//! loops.
//!
//! While a foreground thread blocks waiting for a line or a keystroke, the
//! displayed prompt can still be erased and repainted by a periodic refresh
//! timer, or by any other thread printing output "through" the live prompt,
//! without corrupting the cursor or interleaving partial writes.
//!
//! ## Core Concepts
//!
//! - **Prompt region**: the in-place-erasable span of characters at the
//!   cursor between reads, repainted with only relative cursor motion.
//! - **Gate**: a binary lock serializing every terminal mutation; the
//!   refresh timer only ever takes it opportunistically.
//! - **Two input modes**: per-keystroke or per-line, mutually exclusive by
//!   construction, each with an exact-match quit condition.
//! - **Failure containment**: a handler error becomes one diagnostic line
//!   and the loop keeps running.
//!
//! ## Example
//!
//! ```rust,no_run
//! use promptline::PromptBuilder;
//!
//! PromptBuilder::new()
//!     .populate_prompt(|| "demo > ".to_string())
//!     .line_handler(|prompt, line| {
//!         prompt.write_line(format!("echo: {line}"))?;
//!         Ok(())
//!     })
//!     .quit_line("exit")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod console;
pub mod tiles;

mod builder;
mod engine;
mod error;
mod input;
mod render;
mod text;
mod timer;

// Re-exports for convenience
pub use builder::PromptBuilder;
pub use console::{CaptureConsole, Console, StdoutConsole, StyleSheet, StyledConsole};
pub use engine::{LockedPrompt, PromptEngine, PromptHandle};
pub use error::{HandlerError, HandlerResult, PromptError};
pub use input::{KeyCode, KeyEvent, KeyModifiers, PromptInput, ScriptedInput, TerminalInput};
pub use text::{display_width, pad_to_width, truncate_to_width, wrap_to_width};
pub use tiles::{Tile, TileGrid, TileGridConfig};
