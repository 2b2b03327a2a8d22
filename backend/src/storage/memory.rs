use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use crate::state::Snapshot;
use crate::storage::traits::SnapshotStorage;

/// In-memory snapshot storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Option<Snapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStorage for MemoryStorage {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.inner.lock().expect("memory storage lock poisoned") = Some(snapshot.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.inner.lock().expect("memory storage lock poisoned").clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.lock().expect("memory storage lock poisoned") = None;
        Ok(())
    }
}
