//! Errors produced by action discovery and invocation.

use thiserror::Error;

/// Result alias for action operations.
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors produced by action registration, discovery, and invocation.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Two registered functions resolve to the same action name.
    #[error("duplicate action `{name}` declared in `{first}` and `{second}`")]
    DuplicateAction {
        /// Name shared by both functions.
        name: String,
        /// Module holding the first declaration.
        first: String,
        /// Module holding the second declaration.
        second: String,
    },

    /// Requested action does not exist.
    #[error("action `{name}` is not registered")]
    UnknownAction {
        /// Name of the missing action.
        name: String,
    },

    /// A required argument was not supplied.
    #[error("missing argument `{name}`")]
    MissingArgument {
        /// External name of the argument.
        name: String,
    },

    /// An argument could not be decoded into the declared parameter type.
    #[error("invalid argument `{name}`: {source}")]
    InvalidArgument {
        /// External name of the argument.
        name: String,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// Text did not conform to the expected date/time layout.
    #[error("text `{input}` could not be parsed: {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A formatting pattern is malformed or uses unsupported letters.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A time-zone identifier could not be resolved.
    #[error("unknown time-zone id `{zone}`")]
    UnknownZone {
        /// The offending identifier.
        zone: String,
    },

    /// A value fell outside the supported calendar range.
    #[error("value out of range: {reason}")]
    OutOfRange {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The action output could not be encoded as JSON.
    #[error("failed to encode action output: {0}")]
    Output(#[from] serde_json::Error),

    /// Registered metadata failed validation.
    #[error(transparent)]
    Metadata(#[from] datetime_primitives::Error),
}

impl ActionError {
    /// Creates a parse error for the supplied input.
    #[must_use]
    pub fn parse(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a pattern error for the supplied pattern.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by text that does not match its
    /// expected layout.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
