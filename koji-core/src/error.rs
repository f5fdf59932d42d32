//! Error types for the Koji core library.
//!
//! Nothing on the behavior path is fatal: lookup misses are no-ops and
//! sampling degeneracies fall back to a neutral action. These errors only
//! surface from configuration loading and from parsing vocabulary names.

use thiserror::Error;

/// Top-level error type for Koji core operations.
#[derive(Error, Debug)]
pub enum KojiError {
    /// A string did not name a known vocabulary item.
    #[error("Unknown {kind}: {name:?}")]
    UnknownName {
        /// Which vocabulary was searched (mood, event, action, ...).
        kind: &'static str,
        /// The rejected input.
        name: String,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, KojiError>;
