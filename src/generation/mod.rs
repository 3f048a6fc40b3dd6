//! Generation domain module
//!
//! Domain types shared by every workflow, the provider port, response
//! interpretation, secret lookup and static client templates. Nothing in
//! here performs filesystem I/O.

pub mod errors;
pub mod response;
pub mod secrets;
pub mod templates;
pub mod traits;
pub mod types;

pub use errors::*;
pub use response::ProviderResponse;
pub use secrets::{
    EnvSecretSource, PlaceholderSecretSource, Secret, SecretSource, StaticSecretSource,
};
pub use traits::*;
pub use types::*;
