// ABOUTME: Session store module with the persistence contract and its file-backed implementation
// Records are write-once; the only mutation is removal

pub mod persistence;

pub use persistence::FileSessionStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::SessionRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write session record: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("failed to read session store: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to encode session record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("session record already exists: {0}")]
    DuplicateId(Uuid),
}

/// Durable store of session records, keyed by id.
///
/// Implementations must keep records individually addressable: the
/// find-by-token scan reads every record, so a record must be readable
/// without any index.
pub trait SessionStore: Send + Sync {
    /// Persist a new record. Never overwrites; a colliding id is a
    /// creation failure.
    fn create(&self, record: &SessionRecord) -> Result<Uuid, StoreError>;

    /// Scan live (non-expired) records for a token match. Expired records
    /// are never returned even while still persisted. If several live
    /// records share a token, the most recently created wins.
    fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Idempotent removal; absent records are not an error.
    fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    /// Delete every expired record, returning how many were removed.
    /// Housekeeping only; never on the relay request path.
    fn sweep_expired(&self) -> Result<usize, StoreError>;
}
