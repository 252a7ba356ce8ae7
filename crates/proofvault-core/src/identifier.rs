//! Canonical ledger identifiers.
//!
//! The ledger indexes proofs by a fixed-width 32-byte key, rendered as
//! `0x` + 64 lowercase hex characters (66 characters total). Identifiers
//! arrive from several shapes of input:
//! - a freshly computed `ContentDigest` (64 bare hex chars)
//! - pasted text, with or without a `0x` prefix
//! - a scanned transport payload, which wraps the value in a JSON object
//!
//! `normalize` accepts all of them. It is lenient on purpose: partial values
//! are left-zero-padded rather than rejected so that identifiers already in
//! circulation keep resolving. Callers that want validation use
//! `parse_strict`, which enforces hex content and length.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;
use crate::errors::{VaultError, VaultResult};

/// Unprefixed hex width of a canonical identifier.
pub const IDENTIFIER_HEX_LEN: usize = 64;

/// A canonical ledger identifier: `0x` + 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Normalize arbitrary caller-supplied text into canonical form.
    ///
    /// Total and infallible: non-hex input flows through the padding logic
    /// unchanged apart from casing. Use `parse_strict` to reject it instead.
    pub fn normalize(text: &str) -> Self {
        let mut candidate = text.trim().to_string();

        // A scanned transport payload may wrap the value in a JSON object.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&candidate) {
            if let Some(hash) = value.get("hash").and_then(|h| h.as_str()) {
                return Self::normalize(hash);
            }
        }

        if candidate.starts_with("0x") || candidate.starts_with("0X") {
            candidate = candidate[2..].to_string();
        }
        let mut canonical = candidate.to_ascii_lowercase();

        if canonical.len() < IDENTIFIER_HEX_LEN {
            let mut padded = "0".repeat(IDENTIFIER_HEX_LEN - canonical.len());
            padded.push_str(&canonical);
            canonical = padded;
        }

        Identifier(format!("0x{canonical}"))
    }

    /// Strict variant: rejects non-hex characters and over-length input
    /// with `MalformedIdentifier`. Short hex input is still left-padded.
    pub fn parse_strict(text: &str) -> VaultResult<Self> {
        let trimmed = text.trim();
        let bare = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if bare.is_empty() {
            return Err(VaultError::malformed_identifier("empty identifier"));
        }
        if bare.len() > IDENTIFIER_HEX_LEN {
            return Err(VaultError::malformed_identifier(format!(
                "expected at most {IDENTIFIER_HEX_LEN} hex characters, got {}",
                bare.len()
            )));
        }
        if let Some(bad) = bare.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(VaultError::malformed_identifier(format!(
                "non-hex character {bad:?}"
            )));
        }

        Ok(Self::normalize(bare))
    }

    /// The full canonical rendering, `0x` prefix included.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 64 hex characters without the prefix.
    pub fn bare_hex(&self) -> &str {
        &self.0[2..]
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&ContentDigest> for Identifier {
    fn from(digest: &ContentDigest) -> Self {
        Identifier(format!("0x{}", digest.to_hex()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::digest_bytes;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn canonical_width() {
        let id = Identifier::normalize("ab");
        assert_eq!(id.as_str().len(), 66);
        assert_eq!(id.as_str(), format!("0x{}ab", "0".repeat(62)));
    }

    #[test]
    fn prefix_insensitive() {
        let bare = Identifier::normalize(EMPTY_SHA256);
        let prefixed = Identifier::normalize(&format!("0x{EMPTY_SHA256}"));
        assert_eq!(bare, prefixed);
        assert_eq!(bare.bare_hex(), EMPTY_SHA256);
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["ab", "0xAB", EMPTY_SHA256, "not hex at all"] {
            let once = Identifier::normalize(input);
            let twice = Identifier::normalize(once.as_str());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn json_wrapped_hash_is_unwrapped() {
        let payload = format!(r#"{{"hash":"0x{EMPTY_SHA256}","verified":true}}"#);
        let id = Identifier::normalize(&payload);
        assert_eq!(id.bare_hex(), EMPTY_SHA256);
    }

    #[test]
    fn casing_is_canonicalized() {
        let id = Identifier::normalize("0xABCDEF");
        assert!(id.as_str().ends_with("abcdef"));
    }

    #[test]
    fn from_digest_round_trips_through_normalize() {
        let digest = digest_bytes(b"thesis.pdf");
        let id = Identifier::from(&digest);
        assert_eq!(Identifier::normalize(id.as_str()), id);
    }

    #[test]
    fn strict_accepts_canonical_and_short_hex() {
        assert!(Identifier::parse_strict(&format!("0x{EMPTY_SHA256}")).is_ok());
        let short = Identifier::parse_strict("ab").unwrap();
        assert_eq!(short, Identifier::normalize("ab"));
    }

    #[test]
    fn strict_rejects_non_hex_and_over_length() {
        assert!(matches!(
            Identifier::parse_strict("zzzz").unwrap_err(),
            VaultError::MalformedIdentifier(_)
        ));
        let long = "a".repeat(65);
        assert!(matches!(
            Identifier::parse_strict(&long).unwrap_err(),
            VaultError::MalformedIdentifier(_)
        ));
        assert!(Identifier::parse_strict("   ").is_err());
    }
}
