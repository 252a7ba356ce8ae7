//! Verification query service.
//!
//! The independent read path: normalize caller input, look the identifier
//! up on the ledger, and, when a proof exists, resolve its metadata record
//! for display. The ledger lookup and the metadata resolution are two
//! independently-failable facts: a gateway outage never turns an existing
//! proof into "not found".

use serde::Serialize;

use proofvault_core::codec::TransportPayload;
use proofvault_core::identifier::Identifier;
use proofvault_core::metadata::MetadataRecord;
use proofvault_core::VaultResult;

use crate::ledger::Ledger;
use crate::store::ContentStore;

/// Everything a caller needs to render a verification result.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub identifier: Identifier,
    pub exists: bool,
    pub token_id: u64,
    pub owner: String,
    pub metadata_uri: Option<String>,
    /// Resolved record, when the pointer was present and fetchable.
    pub metadata: Option<MetadataRecord>,
    /// Why metadata resolution failed, independent of `exists`.
    pub metadata_error: Option<String>,
    pub display_name: String,
}

impl VerificationReport {
    /// Build the out-of-band payload for a proof that exists.
    pub fn to_transport_payload(&self, timestamp: &str) -> Option<TransportPayload> {
        if !self.exists {
            return None;
        }
        Some(TransportPayload::new(
            &self.identifier,
            self.token_id,
            self.metadata_uri.as_deref().unwrap_or(""),
            timestamp,
        ))
    }
}

/// Verify arbitrary caller input against the ledger.
///
/// Input may be a bare digest, a prefixed identifier, or a scanned
/// transport payload; it goes through the codec's decode fallback. Pure
/// read: safe to call concurrently and repeatedly.
pub async fn verify_input<L, S>(
    ledger: &L,
    store: &S,
    input: &str,
) -> VaultResult<VerificationReport>
where
    L: Ledger + ?Sized,
    S: ContentStore + ?Sized,
{
    let identifier = TransportPayload::decode(input);
    verify_identifier(ledger, store, &identifier).await
}

/// Verify a canonical identifier against the ledger.
pub async fn verify_identifier<L, S>(
    ledger: &L,
    store: &S,
    identifier: &Identifier,
) -> VaultResult<VerificationReport>
where
    L: Ledger + ?Sized,
    S: ContentStore + ?Sized,
{
    let entry = ledger.lookup(identifier).await?;

    if !entry.exists {
        tracing::debug!(identifier = %identifier, "identifier not on ledger");
        return Ok(VerificationReport {
            identifier: identifier.clone(),
            exists: false,
            token_id: 0,
            owner: String::new(),
            metadata_uri: None,
            metadata: None,
            metadata_error: None,
            display_name: "Unknown".to_string(),
        });
    }

    // Secondary, independent step: resolve the pointed-to record. Failure
    // here is reported alongside the positive ledger result, not instead
    // of it.
    let (metadata, metadata_error) = match &entry.metadata_uri {
        Some(pointer) => match store.get(pointer).await {
            Ok(record) => (Some(record), None),
            Err(e) => {
                tracing::warn!(identifier = %identifier, error = %e, "metadata resolution failed");
                (None, Some(e.to_string()))
            }
        },
        None => (None, None),
    };

    let display_name = metadata
        .as_ref()
        .map(|r| r.display_name().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(VerificationReport {
        identifier: identifier.clone(),
        exists: true,
        token_id: entry.token_id,
        owner: entry.owner,
        metadata_uri: entry.metadata_uri.map(|p| p.to_string()),
        metadata,
        metadata_error,
        display_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryLedger, MemoryStore};
    use crate::publish::publish_metadata;
    use proofvault_core::digest::digest_bytes;
    use proofvault_core::metadata::SubjectDetails;

    async fn registered_fixture() -> (MemoryLedger, MemoryStore, Identifier) {
        let ledger = MemoryLedger::new("0xissuer");
        let store = MemoryStore::new();
        let digest = digest_bytes(b"diploma");
        let subject = SubjectDetails {
            name: "Jane Doe".into(),
            ..Default::default()
        };
        let pointer = publish_metadata(&store, &subject, &digest, "diploma.pdf")
            .await
            .unwrap();
        let identifier = Identifier::from(&digest);
        let sub = ledger
            .register("0xissuer", &identifier, &pointer)
            .await
            .unwrap();
        ledger.confirm(&sub).await.unwrap();
        (ledger, store, identifier)
    }

    #[tokio::test]
    async fn existing_proof_resolves_metadata_and_name() {
        let (ledger, store, id) = registered_fixture().await;
        let report = verify_identifier(&ledger, &store, &id).await.unwrap();
        assert!(report.exists);
        assert_eq!(report.token_id, 1);
        assert_eq!(report.owner, "0xissuer");
        assert_eq!(report.display_name, "Jane Doe");
        assert!(report.metadata.is_some());
        assert!(report.metadata_error.is_none());
    }

    #[tokio::test]
    async fn unknown_identifier_reports_absent_without_metadata_fetch() {
        let ledger = MemoryLedger::new("0xissuer");
        // An empty store would make any fetch fail loudly; absence must not
        // even attempt one.
        let store = MemoryStore::new();
        let report = verify_input(&ledger, &store, "does-not-exist").await.unwrap();
        assert!(!report.exists);
        assert!(report.metadata.is_none());
        assert!(report.metadata_error.is_none());
        assert!(report.to_transport_payload("2024-01-01T00:00:00Z").is_none());
    }

    #[tokio::test]
    async fn metadata_failure_does_not_erase_ledger_result() {
        let (ledger, _store, id) = registered_fixture().await;
        // Fresh store: the pointer resolves nowhere.
        let empty = MemoryStore::new();
        let report = verify_identifier(&ledger, &empty, &id).await.unwrap();
        assert!(report.exists);
        assert_eq!(report.token_id, 1);
        assert!(report.metadata.is_none());
        assert!(report.metadata_error.is_some());
        assert_eq!(report.display_name, "Unknown");
    }

    #[tokio::test]
    async fn scanned_payload_input_verifies() {
        let (ledger, store, id) = registered_fixture().await;
        let report = verify_identifier(&ledger, &store, &id).await.unwrap();
        let payload = report
            .to_transport_payload("2024-06-01T00:00:00Z")
            .unwrap()
            .encode()
            .unwrap();

        let rescanned = verify_input(&ledger, &store, &payload).await.unwrap();
        assert!(rescanned.exists);
        assert_eq!(rescanned.identifier, id);
    }
}
