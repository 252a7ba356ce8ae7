//! Transport codec for out-of-band identifier exchange.
//!
//! Verified proofs can be carried on a secondary channel (typically an
//! optical code printed on the document). The payload is a small
//! self-describing JSON object; decoding accepts either that structure or a
//! bare identifier, so a scanner pointed at older codes still resolves.
//!
//! Wire schema (field names are frozen):
//! `{ "hash", "tokenId", "metadataURI", "verified", "timestamp" }`

use serde::{Deserialize, Serialize};

use crate::errors::{VaultError, VaultResult};
use crate::identifier::Identifier;

/// The serialized structure carried by an optical code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportPayload {
    pub hash: String,
    #[serde(rename = "tokenId")]
    pub token_id: String,
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
    pub verified: bool,
    /// RFC 3339 timestamp chosen at encode time by the caller.
    pub timestamp: String,
}

impl TransportPayload {
    pub fn new(
        identifier: &Identifier,
        token_id: u64,
        metadata_uri: &str,
        timestamp: &str,
    ) -> Self {
        TransportPayload {
            hash: identifier.as_str().to_string(),
            token_id: token_id.to_string(),
            metadata_uri: metadata_uri.to_string(),
            verified: true,
            timestamp: timestamp.to_string(),
        }
    }

    /// Serialize to the JSON wire form.
    pub fn encode(&self) -> VaultResult<String> {
        serde_json::to_string(self).map_err(|e| VaultError::serialization(e.to_string()))
    }

    /// Extract the canonical identifier from a scanned payload.
    ///
    /// Anything that does not parse as the payload structure is treated as a
    /// candidate identifier and handed to the normalizer. This function is
    /// therefore total over scanner output.
    pub fn decode(text: &str) -> Identifier {
        if let Ok(payload) = serde_json::from_str::<TransportPayload>(text) {
            return Identifier::normalize(&payload.hash);
        }
        Identifier::normalize(text)
    }

    /// Parse the full structure, for callers that need the auxiliary fields.
    pub fn parse(text: &str) -> VaultResult<Self> {
        serde_json::from_str(text).map_err(|e| VaultError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn id() -> Identifier {
        Identifier::normalize(HEX)
    }

    #[test]
    fn round_trip_preserves_identifier() {
        let payload = TransportPayload::new(&id(), 42, "ipfs://QmExample", "2024-06-01T00:00:00Z");
        let encoded = payload.encode().unwrap();
        assert_eq!(TransportPayload::decode(&encoded), id());
    }

    #[test]
    fn wire_field_names_are_stable() {
        let payload = TransportPayload::new(&id(), 7, "ipfs://QmX", "2024-01-01T00:00:00Z");
        let value: serde_json::Value = serde_json::from_str(&payload.encode().unwrap()).unwrap();
        assert_eq!(value["tokenId"], "7");
        assert_eq!(value["metadataURI"], "ipfs://QmX");
        assert_eq!(value["verified"], true);
        assert!(value["hash"].is_string());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn decode_falls_back_to_raw_text() {
        assert_eq!(TransportPayload::decode(HEX), id());
        assert_eq!(TransportPayload::decode(&format!("0x{HEX}")), id());
    }

    #[test]
    fn decode_of_partial_hex_pads() {
        let decoded = TransportPayload::decode("ab");
        assert_eq!(decoded, Identifier::normalize("ab"));
    }

    #[test]
    fn parse_keeps_auxiliary_fields() {
        let payload = TransportPayload::new(&id(), 9, "ipfs://QmY", "2024-02-02T00:00:00Z");
        let parsed = TransportPayload::parse(&payload.encode().unwrap()).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn parse_rejects_non_payload_text() {
        assert!(TransportPayload::parse("just a hash").is_err());
    }
}
