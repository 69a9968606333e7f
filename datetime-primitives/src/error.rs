//! Shared error definitions for toolkit primitives.

use thiserror::Error;

/// Result alias used throughout the toolkit primitives.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Action descriptor failed validation.
    #[error("invalid action: {reason}")]
    InvalidAction {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Two actions in the same manifest resolve to the same name.
    #[error("duplicate action name `{name}`")]
    DuplicateAction {
        /// The colliding action name.
        name: String,
    },

    /// Manifest definition failed validation.
    #[error("invalid manifest: {reason}")]
    InvalidManifest {
        /// Human-readable reason for rejection.
        reason: String,
    },
}
