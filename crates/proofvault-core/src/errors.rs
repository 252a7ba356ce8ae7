//! Error taxonomy for ProofVault.
//!
//! Every failure mode visible to callers has a distinct variant so that the
//! CLI and embedding applications can react to specific outcomes without
//! string matching. Variants that describe an identity mismatch carry both
//! sides of the comparison for self-diagnosis.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// The byte source for a digest could not be read.
    #[error("digest unavailable: {0}")]
    DigestUnavailable(String),

    /// The content store is unreachable or rejected the metadata payload.
    #[error("publish unavailable: {0}")]
    PublishUnavailable(String),

    /// The acting identity does not match the ledger's recorded authority.
    #[error("not authorized: expected authority {expected}, connected identity {actual}")]
    NotAuthorized { expected: String, actual: String },

    /// The ledger refused the registration submission.
    #[error("registration rejected: {0}")]
    RegistrationRejected(String),

    /// A proof already exists for this identifier. Expected and recoverable:
    /// the proof demonstrably exists on the ledger.
    #[error("proof already registered for {identifier}")]
    AlreadyExists { identifier: String },

    /// The ledger entry exists but its metadata record could not be resolved.
    /// Never conflated with "proof does not exist".
    #[error("metadata unavailable: {0}")]
    MetadataUnavailable(String),

    /// Strict identifier parsing rejected the input.
    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// The ledger could not be reached at all.
    #[error("ledger unreachable: {0}")]
    LedgerUnreachable(String),

    /// Ledger finalization did not complete within the configured deadline.
    #[error("confirmation timed out after {0}")]
    ConfirmationTimeout(String),

    /// An operation was attempted from a lifecycle state that does not
    /// permit it (for example, `submit` while a mint is already in flight).
    #[error("invalid lifecycle state: {state}")]
    InvalidState { state: String },

    /// A record could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VaultError {
    pub fn digest_unavailable(msg: impl Into<String>) -> Self {
        Self::DigestUnavailable(msg.into())
    }

    pub fn publish_unavailable(msg: impl Into<String>) -> Self {
        Self::PublishUnavailable(msg.into())
    }

    pub fn not_authorized(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::NotAuthorized {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn registration_rejected(msg: impl Into<String>) -> Self {
        Self::RegistrationRejected(msg.into())
    }

    pub fn already_exists(identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            identifier: identifier.into(),
        }
    }

    pub fn metadata_unavailable(msg: impl Into<String>) -> Self {
        Self::MetadataUnavailable(msg.into())
    }

    pub fn malformed_identifier(msg: impl Into<String>) -> Self {
        Self::MalformedIdentifier(msg.into())
    }

    pub fn ledger_unreachable(msg: impl Into<String>) -> Self {
        Self::LedgerUnreachable(msg.into())
    }

    pub fn invalid_state(state: impl Into<String>) -> Self {
        Self::InvalidState {
            state: state.into(),
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True for outcomes a caller should treat as informational rather than
    /// as a hard failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VaultError::AlreadyExists { .. })
    }
}
