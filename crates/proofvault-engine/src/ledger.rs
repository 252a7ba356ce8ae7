//! Ledger contract.
//!
//! The ledger is an external collaborator: an append-only system that
//! records proof registrations and is the source of truth for existence and
//! ownership. The engine only requires the operations below; real chain
//! clients and the in-memory test ledger both implement them.
//!
//! Registration is two-phase, matching how public ledgers behave:
//! `register` returns once the write has been *accepted* (a `Submission`),
//! and `confirm` resolves once it is *final*. The orchestrator maps the two
//! phases onto its `Pending` and `Confirming` states.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use proofvault_core::identifier::Identifier;
use proofvault_core::VaultResult;

use crate::store::MetadataPointer;

/// A ledger write that has been accepted but not yet finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Opaque reference to the in-flight write (transaction hash or
    /// equivalent).
    pub reference: String,
    pub identifier: Identifier,
}

/// The receipt produced when a submission finalizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub token_id: u64,
    pub identifier: Identifier,
    pub owner: String,
    pub metadata_uri: String,
}

/// Result of an identifier lookup.
///
/// `owner` and `metadata_uri` are only meaningful when `exists` is true;
/// ledgers return zero/empty sentinels otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub exists: bool,
    pub token_id: u64,
    pub owner: String,
    pub metadata_uri: Option<MetadataPointer>,
}

impl LedgerEntry {
    pub fn absent() -> Self {
        LedgerEntry {
            exists: false,
            token_id: 0,
            owner: String::new(),
            metadata_uri: None,
        }
    }
}

/// Audit event emitted for every successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub token_id: u64,
    pub owner: String,
    pub identifier: Identifier,
    pub metadata_uri: String,
    /// RFC 3339.
    pub timestamp: String,
}

/// The operations the engine requires of a ledger.
///
/// Uniqueness of identifiers is the ledger's responsibility: `register`
/// must fail with `AlreadyExists` for a duplicate, and the engine treats
/// that as an expected, non-fatal outcome.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Submit a registration. Acceptance is not finality.
    async fn register(
        &self,
        owner: &str,
        identifier: &Identifier,
        metadata_uri: &MetadataPointer,
    ) -> VaultResult<Submission>;

    /// Await finalization of an accepted submission.
    async fn confirm(&self, submission: &Submission) -> VaultResult<RegistrationReceipt>;

    /// Look up an identifier. Idempotent, safe to call concurrently.
    async fn lookup(&self, identifier: &Identifier) -> VaultResult<LedgerEntry>;

    /// Read the identity permitted to register new proofs.
    async fn read_authority(&self) -> VaultResult<String>;
}
