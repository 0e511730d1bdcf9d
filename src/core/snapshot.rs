use crate::core::{ServiceInformation, ServiceInformationSource, Storage};
use crate::utils::error::Result;

/// Keeps service information snapshots as JSON files in a [`Storage`].
#[derive(Debug, Clone)]
pub struct SnapshotStore<S: Storage> {
    storage: S,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn save(&self, name: &str, info: &ServiceInformation) -> Result<()> {
        let json = serde_json::to_vec_pretty(info)?;
        self.storage.write_file(name, &json).await?;
        tracing::debug!("Saved snapshot '{}' ({} bytes)", name, json.len());
        Ok(())
    }

    pub async fn load(&self, name: &str) -> Result<ServiceInformation> {
        let data = self.storage.read_file(name).await?;
        let info = serde_json::from_slice(&data)?;
        tracing::debug!("Loaded snapshot '{}'", name);
        Ok(info)
    }

    /// A source that always answers with the snapshot stored under `name`.
    pub fn source(&self, name: impl Into<String>) -> StoredSnapshot<'_, S> {
        StoredSnapshot {
            store: self,
            name: name.into(),
        }
    }
}

pub struct StoredSnapshot<'a, S: Storage> {
    store: &'a SnapshotStore<S>,
    name: String,
}

#[async_trait::async_trait]
impl<'a, S: Storage> ServiceInformationSource for StoredSnapshot<'a, S> {
    async fn fetch(&self) -> Result<ServiceInformation> {
        self.store.load(&self.name).await
    }
}
