//! Integra core
//!
//! Shared building blocks used by every other layer: the crate error type,
//! integration name normalisation, workspace configuration and logging.

pub mod config;
pub mod error;
pub mod logging;
pub mod slug;

pub use config::{AppConfig, Workspace};
pub use error::{Error, Result};
pub use slug::{derive_name, slugify};
