//! Startup identity bootstrap: reuse an existing DID or create one on testnet.

mod bootstrap;
pub mod decode;
mod errors;

pub use bootstrap::{
    BootstrapPhase, Identity, IdentityBootstrap, IdentityOrigin, bootstrap_identity,
};
pub use errors::BootstrapError;
