//! proofvault-engine
//!
//! The proof lifecycle engine:
//! - `Ledger` and `ContentStore` contracts for the external collaborators
//! - metadata publishing
//! - the mint lifecycle orchestrator (explicit state machine)
//! - the verification query path with independent metadata resolution
//! - in-memory collaborators for tests and demos
//! - an HTTP gateway-backed content store (feature `http`, default on)
//!
//! Each step's output feeds the next, so there is no intra-lifecycle
//! parallelism; independent lifecycle instances may run concurrently and
//! coordinate only through the ledger.

pub mod config;
#[cfg(feature = "http")]
pub mod http;
pub mod ledger;
pub mod lifecycle;
pub mod memory;
pub mod publish;
pub mod store;
pub mod verify;

pub use proofvault_core::{VaultError, VaultResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::EngineConfig;
    #[cfg(feature = "http")]
    pub use crate::http::HttpGatewayStore;
    pub use crate::ledger::{Ledger, LedgerEntry, RegistrationEvent, RegistrationReceipt, Submission};
    pub use crate::lifecycle::{LifecycleState, MintLifecycle, MintReceipt, MintRequest};
    pub use crate::memory::{MemoryLedger, MemoryStore};
    pub use crate::publish::publish_metadata;
    pub use crate::store::{ContentStore, MetadataPointer};
    pub use crate::verify::{verify_identifier, verify_input, VerificationReport};
    pub use crate::{VaultError, VaultResult};
}
