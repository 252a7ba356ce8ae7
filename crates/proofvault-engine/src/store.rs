//! Content store contract.
//!
//! The content store is the second external collaborator: it persists
//! metadata records and returns an opaque retrieval pointer. Pointers are
//! URI-like strings with a scheme prefix (`ipfs://Qm…`, `memory://…`) and a
//! corresponding HTTP gateway mapping for retrieval.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use proofvault_core::metadata::MetadataRecord;
use proofvault_core::VaultResult;

/// An opaque retrieval locator returned by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataPointer(String);

impl MetadataPointer {
    pub fn new(uri: impl Into<String>) -> Self {
        MetadataPointer(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pointer value without its scheme prefix.
    pub fn value(&self) -> &str {
        match self.0.find("://") {
            Some(idx) => &self.0[idx + 3..],
            None => &self.0,
        }
    }

    /// The scheme prefix, if the pointer carries one.
    pub fn scheme(&self) -> Option<&str> {
        self.0.find("://").map(|idx| &self.0[..idx])
    }

    /// Map the pointer onto an HTTP-fetchable gateway URL.
    ///
    /// `ipfs://CID` becomes `<base>/ipfs/CID`; pointers that are already
    /// HTTP URLs pass through unchanged; anything else is appended to the
    /// base path-style.
    pub fn gateway_url(&self, gateway_base: &str) -> String {
        let base = gateway_base.trim_end_matches('/');
        match self.scheme() {
            Some("http") | Some("https") => self.0.clone(),
            Some(scheme) => format!("{base}/{scheme}/{}", self.value()),
            None => format!("{base}/{}", self.value()),
        }
    }
}

impl fmt::Display for MetadataPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The operations the engine requires of a content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persist a record, returning its retrieval pointer. Fails with
    /// `PublishUnavailable` when the store is unreachable or rejects the
    /// payload.
    async fn put(&self, record: &MetadataRecord) -> VaultResult<MetadataPointer>;

    /// Retrieve a record by pointer. Fails with `MetadataUnavailable`.
    async fn get(&self, pointer: &MetadataPointer) -> VaultResult<MetadataRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipfs_pointer_maps_to_gateway_path() {
        let ptr = MetadataPointer::new("ipfs://QmExampleCid");
        assert_eq!(ptr.scheme(), Some("ipfs"));
        assert_eq!(ptr.value(), "QmExampleCid");
        assert_eq!(
            ptr.gateway_url("https://ipfs.io"),
            "https://ipfs.io/ipfs/QmExampleCid"
        );
    }

    #[test]
    fn http_pointer_passes_through() {
        let ptr = MetadataPointer::new("https://example.com/meta.json");
        assert_eq!(
            ptr.gateway_url("https://ipfs.io"),
            "https://example.com/meta.json"
        );
    }

    #[test]
    fn schemeless_pointer_is_appended() {
        let ptr = MetadataPointer::new("QmBareCid");
        assert_eq!(ptr.scheme(), None);
        assert_eq!(ptr.gateway_url("https://ipfs.io/"), "https://ipfs.io/QmBareCid");
    }
}
