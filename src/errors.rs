//! Unified error types for the application.
//!
//! Every fallible operation in the crate returns [`Result`]. Provider errors
//! (database, storage, HTTP) are carried through verbatim; nothing is retried
//! automatically anywhere in the system.

use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input caught before any provider call is made.
    #[error("{message}")]
    Validation {
        /// User-facing description of what was wrong with the input
        message: String,
    },

    /// The database provider rejected a call; message surfaced verbatim.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The blob-storage provider rejected a call; message surfaced verbatim.
    #[error("Storage error: {0}")]
    Storage(#[from] object_store::Error),

    /// PDF parsing or AI response handling failed. Logged at the call site;
    /// callers surface a generic message and mark the upload `failed`.
    #[error("Extraction error: {message}")]
    Extraction {
        /// What went wrong while extracting or analyzing the statement
        message: String,
    },

    /// No authenticated session; triggers a redirect, not an in-page error.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A referenced record does not exist.
    #[error("{what} not found")]
    NotFound {
        /// The kind of record that was looked up
        what: String,
    },

    /// Configuration error (missing or malformed config file / settings).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// An outbound HTTP call (the generative endpoint) failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Extraction`].
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
