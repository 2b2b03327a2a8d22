use anyhow::Result;
use async_trait::async_trait;

use crate::state::Snapshot;

/// Trait defining the interface for whole-state snapshot storage.
///
/// There is deliberately no per-entity API: the state is written and read
/// as one document, with no migration or versioning scheme between
/// releases.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Persist the snapshot, replacing any previous one.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Load the stored snapshot, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<Snapshot>>;

    /// Remove the stored snapshot.
    async fn clear(&self) -> Result<()>;
}
