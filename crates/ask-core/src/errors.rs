//! Cross-cutting error types for askboard.
//!
//! Store-specific errors (`DatabaseError`) live in `ask-db`. The CLI converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any askboard crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller-supplied value could not be interpreted.
    ///
    /// Filter parameters never produce this; they degrade to "no filter".
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
