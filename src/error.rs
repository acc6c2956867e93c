//! Error types for the prompt engine.

use std::io;

/// Errors surfaced to the embedding application.
///
/// Handler failures are deliberately absent: they are contained inside the
/// input loop and reported as a diagnostic line through the live prompt.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Neither a key handler nor a line handler was configured.
    #[error("no key handler or line handler configured")]
    NoHandler,

    /// The display surface rejected a write.
    #[error("display surface error: {0}")]
    Display(#[from] io::Error),

    /// A positional write was given coordinates that would corrupt the
    /// prompt region.
    #[error("invalid write position: column {column}, {rows_up} rows up")]
    InvalidPosition {
        /// Zero-based target column.
        column: u16,
        /// Rows above the prompt row.
        rows_up: u16,
    },

    /// The input source failed while reading a key or line.
    #[error("input source error: {0}")]
    Input(#[source] io::Error),
}

/// Failure raised by a user-supplied handler or startup action.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Outcome of a handler invocation. `Err` is contained by the loop, never
/// propagated to `run`'s caller.
pub type HandlerResult = Result<(), HandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_handler_message() {
        let err = PromptError::NoHandler;
        assert_eq!(err.to_string(), "no key handler or line handler configured");
    }

    #[test]
    fn test_invalid_position_message() {
        let err = PromptError::InvalidPosition { column: 4, rows_up: 0 };
        assert_eq!(err.to_string(), "invalid write position: column 4, 0 rows up");
    }

    #[test]
    fn test_display_from_io() {
        let err: PromptError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, PromptError::Display(_)));
    }
}
