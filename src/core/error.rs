//! Error handling for the Integra library.
//!
//! This module defines the main error type `Error` used by the store and the
//! configuration layer, along with a convenient `Result` type alias. Filesystem
//! failures are carried unmodified so callers see the original `io::Error`.
//!
//! # Examples
//!
//! ```
//! use integra::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("language must not be empty"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for Integra storage and configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Integra storage and configuration operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
