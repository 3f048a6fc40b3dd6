//! Port interfaces for the generation domain

use crate::generation::ProviderError;
use async_trait::async_trait;

/// Turns a prompt into generated source text
///
/// Implementations must not touch the integration store; persisting the
/// result is the caller's job.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Generate text for `prompt` using `model`.
    ///
    /// An explicit `credential` takes precedence over whatever default the
    /// implementation was configured with.
    async fn generate(
        &self,
        prompt: &str,
        credential: Option<&str>,
        model: &str,
    ) -> Result<String, ProviderError>;
}
