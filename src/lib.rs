//! Proof of Promise: a registry of promise classes and the consensual,
//! non-transferable credentials signed against them.
//!
//! An issuer declares a promise class keyed by a content hash, optionally
//! restricted to a closed list of receivers. Receivers sign the promise to
//! obtain a credential whose burn policy was fixed when the class was declared.
//!
//! - **crypto**: SHA-256 hashing, Ed25519 signing/verification, timestamps
//! - **identity**: caller identities and signed-request authentication
//! - **promise**: promise hashes, burn policies, promise class declarations
//! - **ledger**: credential ledger interface and in-memory implementation
//! - **registry**: promise class storage with one-time creation
//! - **signing**: claim validation and credential issuance
//! - **burn**: burn policy evaluation and credential retirement
//! - **events**: journal of issuance, creation, and burn events
//! - **config**: registry configuration
//! - **pop**: the `Pop` facade exposing every operation
//! - **shared**: lock-guarded handle for multi-threaded hosts

pub mod burn;
pub mod config;
pub mod crypto;
pub mod events;
pub mod identity;
pub mod ledger;
pub mod pop;
pub mod promise;
pub mod registry;
pub mod shared;
pub mod signing;

pub use config::PopConfig;
pub use identity::Identity;
pub use ledger::{CredentialId, Ledger, MemoryLedger};
pub use pop::Pop;
pub use promise::{BurnAuth, PromiseClass, PromiseDeclaration, PromiseHash};
pub use shared::SharedPop;

/// Errors that can occur throughout the registry.
///
/// The first seven variants are the operation failures callers see; every one
/// of them is raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PopError {
    #[error("Promise exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not on receivers list: {0}")]
    NotAuthorizedReceiver(String),

    #[error("Invalid reference: credential {credential_id} does not belong to promise {promise_hash}")]
    InvalidReference {
        credential_id: u64,
        promise_hash: String,
    },

    #[error("Only issuer may burn")]
    OnlyIssuerMayBurn,

    #[error("Only owner may burn")]
    OnlyOwnerMayBurn,

    #[error("Burn not allowed")]
    BurnNotAllowed,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("Lock poisoned")]
    LockError,
}

/// Convenience alias used by every fallible operation in the crate.
pub type PopResult<T> = Result<T, PopError>;
