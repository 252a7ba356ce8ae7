//! proofvault-core
//!
//! Core primitives for ProofVault:
//! - Content digest engine (SHA-256 over document bytes)
//! - Canonical 32-byte ledger identifiers and lenient/strict normalization
//! - Metadata record model with typed attribute lookup
//! - Authority gate (fail-closed, case-insensitive address comparison)
//! - Transport codec for out-of-band identifier exchange
//!
//! This crate performs no I/O and reads no clock. Timestamps and fetched
//! values are injected by callers; the engine layer lives in
//! `proofvault-engine`.

pub mod authority;
pub mod codec;
pub mod digest;
pub mod errors;
pub mod identifier;
pub mod metadata;

pub use crate::errors::{VaultError, VaultResult};

/// The all-zero identifier, used by ledgers as the absent-value sentinel.
pub const ZERO_IDENTIFIER_HEX: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Convenience re-exports.
pub mod prelude {
    pub use crate::authority::{evaluate, is_authorized, AuthorityStatus};
    pub use crate::codec::TransportPayload;
    pub use crate::digest::{digest_bytes, digest_file, digest_reader, ContentDigest};
    pub use crate::identifier::{Identifier, IDENTIFIER_HEX_LEN};
    pub use crate::metadata::{Attribute, AttributeTag, MetadataRecord, SubjectDetails};
    pub use crate::{VaultError, VaultResult};
}
