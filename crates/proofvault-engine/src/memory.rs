//! In-memory ledger and content store.
//!
//! Primarily for tests and demos. Semantics match the external contracts:
//! the ledger enforces identifier uniqueness and the authority gate, issues
//! sequential token ids, and keeps an audit log of registration events.
//! Failure-injection toggles let orchestrator tests exercise every failure
//! transition without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use proofvault_core::authority::is_authorized;
use proofvault_core::digest::digest_bytes;
use proofvault_core::identifier::Identifier;
use proofvault_core::metadata::MetadataRecord;
use proofvault_core::{VaultError, VaultResult};

use crate::ledger::{Ledger, LedgerEntry, RegistrationEvent, RegistrationReceipt, Submission};
use crate::publish::issuance_timestamp;
use crate::store::{ContentStore, MetadataPointer};

/// A finalized ledger record.
#[derive(Debug, Clone)]
struct ProofRecord {
    token_id: u64,
    owner: String,
    metadata_uri: MetadataPointer,
}

#[derive(Debug, Clone)]
struct PendingWrite {
    owner: String,
    identifier: Identifier,
    metadata_uri: MetadataPointer,
}

struct LedgerInner {
    records: HashMap<Identifier, ProofRecord>,
    pending: HashMap<String, PendingWrite>,
    events: Vec<RegistrationEvent>,
    next_token_id: u64,
}

/// In-memory `Ledger` implementation.
pub struct MemoryLedger {
    authority: String,
    inner: RwLock<LedgerInner>,
    fail_register: AtomicBool,
    fail_confirm: AtomicBool,
}

impl MemoryLedger {
    pub fn new(authority: impl Into<String>) -> Self {
        MemoryLedger {
            authority: authority.into(),
            inner: RwLock::new(LedgerInner {
                records: HashMap::new(),
                pending: HashMap::new(),
                events: Vec::new(),
                next_token_id: 1,
            }),
            fail_register: AtomicBool::new(false),
            fail_confirm: AtomicBool::new(false),
        }
    }

    /// Make subsequent `register` calls fail with `RegistrationRejected`.
    pub fn fail_register(&self, fail: bool) {
        self.fail_register.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `confirm` calls hang forever; deadline tests bound
    /// the wait on the caller side.
    pub fn fail_confirm(&self, fail: bool) {
        self.fail_confirm.store(fail, Ordering::SeqCst);
    }

    /// The audit log of successful registrations, oldest first.
    pub fn events(&self) -> Vec<RegistrationEvent> {
        self.inner.read().events.clone()
    }

    pub fn total_supply(&self) -> u64 {
        self.inner.read().records.len() as u64
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn register(
        &self,
        owner: &str,
        identifier: &Identifier,
        metadata_uri: &MetadataPointer,
    ) -> VaultResult<Submission> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(VaultError::registration_rejected("injected failure"));
        }
        if !is_authorized(owner, &self.authority) {
            return Err(VaultError::not_authorized(self.authority.clone(), owner));
        }

        let mut inner = self.inner.write();
        if inner.records.contains_key(identifier) {
            return Err(VaultError::already_exists(identifier.as_str()));
        }

        let reference = Uuid::new_v4().to_string();
        inner.pending.insert(
            reference.clone(),
            PendingWrite {
                owner: owner.to_string(),
                identifier: identifier.clone(),
                metadata_uri: metadata_uri.clone(),
            },
        );
        Ok(Submission {
            reference,
            identifier: identifier.clone(),
        })
    }

    async fn confirm(&self, submission: &Submission) -> VaultResult<RegistrationReceipt> {
        if self.fail_confirm.load(Ordering::SeqCst) {
            // Simulate a finalization that never lands.
            std::future::pending::<()>().await;
        }

        let mut inner = self.inner.write();
        let write = inner
            .pending
            .remove(&submission.reference)
            .ok_or_else(|| VaultError::registration_rejected("unknown submission"))?;

        // A competing registration may have landed while this one was pending.
        if inner.records.contains_key(&write.identifier) {
            return Err(VaultError::already_exists(write.identifier.as_str()));
        }

        let token_id = inner.next_token_id;
        inner.next_token_id += 1;
        inner.records.insert(
            write.identifier.clone(),
            ProofRecord {
                token_id,
                owner: write.owner.clone(),
                metadata_uri: write.metadata_uri.clone(),
            },
        );
        inner.events.push(RegistrationEvent {
            token_id,
            owner: write.owner.clone(),
            identifier: write.identifier.clone(),
            metadata_uri: write.metadata_uri.to_string(),
            timestamp: issuance_timestamp(),
        });

        Ok(RegistrationReceipt {
            token_id,
            identifier: write.identifier,
            owner: write.owner,
            metadata_uri: write.metadata_uri.to_string(),
        })
    }

    async fn lookup(&self, identifier: &Identifier) -> VaultResult<LedgerEntry> {
        let inner = self.inner.read();
        Ok(match inner.records.get(identifier) {
            Some(record) => LedgerEntry {
                exists: true,
                token_id: record.token_id,
                owner: record.owner.clone(),
                metadata_uri: Some(record.metadata_uri.clone()),
            },
            None => LedgerEntry::absent(),
        })
    }

    async fn read_authority(&self) -> VaultResult<String> {
        Ok(self.authority.clone())
    }
}

/// In-memory `ContentStore`: content-addressed by the record's JSON digest,
/// with `memory://` pointers.
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, MetadataRecord>>,
    fail_puts: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            blobs: RwLock::new(HashMap::new()),
            fail_puts: AtomicBool::new(false),
        }
    }

    /// Make subsequent `put` calls fail with `PublishUnavailable`.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn put(&self, record: &MetadataRecord) -> VaultResult<MetadataPointer> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(VaultError::publish_unavailable("injected failure"));
        }
        let bytes = serde_json::to_vec(record)
            .map_err(|e| VaultError::serialization(e.to_string()))?;
        let key = digest_bytes(&bytes).to_hex();
        let pointer = MetadataPointer::new(format!("memory://{}", &key[..32]));
        self.blobs.write().insert(key[..32].to_string(), record.clone());
        Ok(pointer)
    }

    async fn get(&self, pointer: &MetadataPointer) -> VaultResult<MetadataRecord> {
        self.blobs
            .read()
            .get(pointer.value())
            .cloned()
            .ok_or_else(|| {
                VaultError::metadata_unavailable(format!("no record at {pointer}"))
            })
    }
}
