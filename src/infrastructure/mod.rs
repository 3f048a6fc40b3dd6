//! Infrastructure adapters
//!
//! Concrete implementations that talk to the outside world: the on-disk
//! integration store, the Gemini provider and the smoke-test probe.

pub mod gemini;
pub mod probe;
pub mod store;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use probe::{HttpProbe, ProbeResult};
pub use store::IntegrationStore;
