use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::state::Snapshot;
use crate::storage::traits::SnapshotStorage;

/// Fixed file name the snapshot lives under; the single "storage key".
const STATE_FILE_NAME: &str = "jamiya-state.json";

/// JSON-file snapshot storage rooted at a base directory.
#[derive(Clone)]
pub struct JsonFileStorage {
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage under the given base directory, creating the
    /// directory if needed.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {}", base_path.display()))?;
        }
        Ok(Self {
            file_path: base_path.join(STATE_FILE_NAME),
        })
    }

    /// Create storage in the default data directory, `~/.jamiya`.
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        Self::new(PathBuf::from(home_dir).join(".jamiya"))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
        // Write-then-rename so a crash mid-write never truncates the
        // previous snapshot.
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("writing snapshot to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("replacing snapshot at {}", self.file_path.display()))?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<Snapshot>> {
        if !self.file_path.exists() {
            info!("No snapshot at {}, starting fresh", self.file_path.display());
            return Ok(None);
        }
        let json = fs::read_to_string(&self.file_path)
            .with_context(|| format!("reading snapshot from {}", self.file_path.display()))?;
        let snapshot = serde_json::from_str(&json).context("deserializing snapshot")?;
        Ok(Some(snapshot))
    }

    async fn clear(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path)
                .with_context(|| format!("removing snapshot at {}", self.file_path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{IncomeLevel, KycStatus, User};

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            users: vec![User {
                id: "user_1".to_string(),
                phone: "0550000001".to_string(),
                email: "test@example.dz".to_string(),
                password: "password123".to_string(),
                full_name: "Test User".to_string(),
                income_level: IncomeLevel::Low,
                kyc_status: KycStatus::Verified,
                id_card_image: None,
                selfie_image: None,
                created_at: Utc::now(),
                is_verified: true,
            }],
            current_user_id: Some("user_1".to_string()),
            is_authenticated: true,
            ..Snapshot::default()
        }
    }

    #[tokio::test]
    async fn test_load_before_any_save_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        let snapshot = sample_snapshot();
        storage.save(&snapshot).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        storage.save(&sample_snapshot()).await.unwrap();
        storage.save(&Snapshot::default()).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert!(loaded.users.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path()).unwrap();

        storage.save(&sample_snapshot()).await.unwrap();
        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let storage = JsonFileStorage::new(&nested).unwrap();
        assert!(nested.exists());
        assert!(storage.file_path().starts_with(&nested));
    }
}
