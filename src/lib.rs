//! Integra library
//!
//! Generates API integration clients by prompting a text-generation provider,
//! and keeps every generated artifact together with the metadata describing
//! the integration (language, base URL, authentication mode).
//!
//! The crate is layered the same way throughout:
//! - [`core`]: errors, name normalisation, configuration and logging
//! - [`generation`]: domain types, provider port and response parsing
//! - [`infrastructure`]: filesystem store, provider HTTP adapter, smoke-test probe
//! - [`application`]: the integration lifecycle use cases
//! - [`web`]: the HTTP front door

#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod web;

pub use application::IntegrationService;
pub use core::{Error, Result};
