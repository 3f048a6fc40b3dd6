//! What the generate workflow does when the provider fails
//!
//! The command line lets provider failures abort the command while the web
//! front door keeps working offline by saving a template client instead.
//! Both choices are made explicitly by passing a policy.

use crate::generation::{ProviderError, ProviderErrorKind};

/// Which provider failures are replaced by the template client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackScope {
    /// HTTP and transport failures only; configuration errors still propagate
    Unavailable,
    /// Every provider failure, including a missing credential
    AnyProviderError,
}

impl FallbackScope {
    pub fn covers(&self, kind: ProviderErrorKind) -> bool {
        match self {
            FallbackScope::Unavailable => {
                matches!(kind, ProviderErrorKind::Http | ProviderErrorKind::Transport)
            }
            FallbackScope::AnyProviderError => true,
        }
    }
}

/// Behaviour of the generate workflow on provider failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Return the provider error to the caller
    #[default]
    Propagate,
    /// Save the static template client instead, for errors within the scope
    SubstituteTemplate(FallbackScope),
}

impl FallbackPolicy {
    /// Whether `error` should be replaced by the template client
    pub fn substitutes(&self, error: &ProviderError) -> bool {
        match self {
            FallbackPolicy::Propagate => false,
            FallbackPolicy::SubstituteTemplate(scope) => scope.covers(error.kind()),
        }
    }
}
