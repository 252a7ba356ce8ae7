//! Proof lifecycle orchestrator.
//!
//! One `MintLifecycle` instance tracks one in-flight attempt to publish
//! metadata and register a proof. The sequence is fixed:
//!
//! ```text
//! Idle -> PublishingMetadata -> AwaitingAuthorization -> Pending
//!      -> Confirming -> Confirmed
//! ```
//!
//! every non-terminal failure lands in `Failed`; `reset` is the only way
//! back to `Idle`. The ordering must not change even across retries: the
//! ledger write embeds the pointer obtained from the publish step, and the
//! authorization check guards the write.
//!
//! Instances do not share mutable state; run one per user session. The
//! ledger is the sole point of cross-session coordination and is the party
//! that rejects duplicate identifiers.

use std::time::Duration;

use parking_lot::Mutex;

use proofvault_core::authority::{self, AuthorityStatus};
use proofvault_core::digest::ContentDigest;
use proofvault_core::identifier::Identifier;
use proofvault_core::metadata::SubjectDetails;
use proofvault_core::{VaultError, VaultResult};

use crate::ledger::Ledger;
use crate::publish::publish_metadata;
use crate::store::{ContentStore, MetadataPointer};

/// Observable lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    PublishingMetadata,
    AwaitingAuthorization,
    Pending,
    Confirming,
    Confirmed,
    Failed,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PublishingMetadata => "publishing-metadata",
            Self::AwaitingAuthorization => "awaiting-authorization",
            Self::Pending => "pending",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

/// One mint request. The acting identity is an explicit field; the engine
/// never reads it from ambient state.
#[derive(Debug, Clone)]
pub struct MintRequest {
    /// The session's connected identity; must match the ledger authority.
    pub owner: String,
    pub subject: SubjectDetails,
    pub digest: ContentDigest,
    pub file_name: String,
}

/// Outcome of a confirmed mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub identifier: Identifier,
    pub token_id: u64,
    pub metadata_uri: MetadataPointer,
}

struct Inner {
    state: LifecycleState,
    history: Vec<LifecycleState>,
    last_error: Option<String>,
}

/// The per-session mint state machine.
///
/// `submit` drives the whole lifecycle; a second `submit` before the first
/// resolves is rejected with `InvalidState` rather than overlapping it.
pub struct MintLifecycle {
    inner: Mutex<Inner>,
    /// Bound on ledger finalization. `None` waits indefinitely, matching
    /// the original behavior; set a deadline to get `ConfirmationTimeout`.
    confirmation_deadline: Option<Duration>,
}

impl MintLifecycle {
    pub fn new() -> Self {
        Self::with_deadline(None)
    }

    pub fn with_deadline(confirmation_deadline: Option<Duration>) -> Self {
        MintLifecycle {
            inner: Mutex::new(Inner {
                state: LifecycleState::Idle,
                history: vec![LifecycleState::Idle],
                last_error: None,
            }),
            confirmation_deadline,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.lock().state
    }

    /// Every state this instance has passed through, in order.
    pub fn history(&self) -> Vec<LifecycleState> {
        self.inner.lock().history.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    /// Return to `Idle` from a terminal state. A new `submit` requires this
    /// explicitly; failed attempts are never retried implicitly.
    pub fn reset(&self) -> VaultResult<()> {
        let mut inner = self.inner.lock();
        match inner.state {
            LifecycleState::Idle => Ok(()),
            LifecycleState::Confirmed | LifecycleState::Failed => {
                inner.state = LifecycleState::Idle;
                inner.history.push(LifecycleState::Idle);
                inner.last_error = None;
                tracing::debug!("lifecycle reset to idle");
                Ok(())
            }
            other => Err(VaultError::invalid_state(other.as_str())),
        }
    }

    /// Run the full mint lifecycle: publish, authorize, register, confirm.
    ///
    /// Exactly one of `Confirmed`/`Failed` is reached for every call that
    /// leaves `Idle`. `AlreadyExists` lands in `Failed` like any rejection,
    /// but is marked recoverable: the proof demonstrably exists.
    pub async fn submit<L, S>(
        &self,
        ledger: &L,
        store: &S,
        request: &MintRequest,
    ) -> VaultResult<MintReceipt>
    where
        L: Ledger + ?Sized,
        S: ContentStore + ?Sized,
    {
        // Atomic check-and-set so concurrent submits cannot interleave.
        self.begin()?;

        match self.run(ledger, store, request).await {
            Ok(receipt) => {
                self.transition(LifecycleState::Confirmed);
                tracing::info!(
                    identifier = %receipt.identifier,
                    token_id = receipt.token_id,
                    "mint confirmed"
                );
                Ok(receipt)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn begin(&self) -> VaultResult<()> {
        let mut inner = self.inner.lock();
        if inner.state != LifecycleState::Idle {
            return Err(VaultError::invalid_state(inner.state.as_str()));
        }
        inner.state = LifecycleState::PublishingMetadata;
        inner.history.push(LifecycleState::PublishingMetadata);
        inner.last_error = None;
        Ok(())
    }

    fn transition(&self, next: LifecycleState) {
        let mut inner = self.inner.lock();
        tracing::debug!(from = inner.state.as_str(), to = next.as_str(), "lifecycle transition");
        inner.state = next;
        inner.history.push(next);
    }

    fn fail(&self, err: &VaultError) {
        let mut inner = self.inner.lock();
        tracing::warn!(from = inner.state.as_str(), error = %err, "mint failed");
        inner.state = LifecycleState::Failed;
        inner.history.push(LifecycleState::Failed);
        inner.last_error = Some(err.to_string());
    }

    async fn run<L, S>(
        &self,
        ledger: &L,
        store: &S,
        request: &MintRequest,
    ) -> VaultResult<MintReceipt>
    where
        L: Ledger + ?Sized,
        S: ContentStore + ?Sized,
    {
        let identifier = Identifier::from(&request.digest);

        // 1) Publish metadata. Its pointer is embedded in the ledger write,
        //    so this step always comes first.
        let pointer =
            publish_metadata(store, &request.subject, &request.digest, &request.file_name).await?;

        // 2) Authority gate. Fail-closed: an unreadable authority denies.
        self.transition(LifecycleState::AwaitingAuthorization);
        let recorded = ledger.read_authority().await?;
        match authority::evaluate(&request.owner, Some(recorded.as_str())) {
            AuthorityStatus::Granted => {}
            AuthorityStatus::Denied { expected, actual } => {
                return Err(VaultError::not_authorized(expected, actual));
            }
            AuthorityStatus::Unknown => {
                return Err(VaultError::not_authorized(recorded, request.owner.clone()));
            }
        }

        // 3) Submit the ledger write. Acceptance is not durability: a
        //    caller observing `Pending` knows only that an attempt exists.
        self.transition(LifecycleState::Pending);
        let submission = ledger.register(&request.owner, &identifier, &pointer).await?;

        // 4) Await finality, bounded by the configured deadline.
        self.transition(LifecycleState::Confirming);
        let receipt = match self.confirmation_deadline {
            None => ledger.confirm(&submission).await?,
            Some(deadline) => tokio::time::timeout(deadline, ledger.confirm(&submission))
                .await
                .map_err(|_| VaultError::ConfirmationTimeout(format!("{deadline:?}")))??,
        };

        Ok(MintReceipt {
            identifier: receipt.identifier,
            token_id: receipt.token_id,
            metadata_uri: pointer,
        })
    }
}

impl Default for MintLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
