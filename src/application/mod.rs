//! Application layer - orchestrates the integration lifecycle use cases

pub mod commands;
pub mod errors;
pub mod fallback;
pub mod service;

pub use commands::*;
pub use errors::*;
pub use fallback::*;
pub use service::IntegrationService;
