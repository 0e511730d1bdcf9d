use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_snapshot_name;
use std::path::PathBuf;

/// Snapshot files kept below one local directory. Names are relative paths
/// and may not climb out of the directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        validate_snapshot_name("snapshot", name)?;
        Ok(self.root.join(name))
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        tracing::debug!("Reading {}", path.display());
        Ok(tokio::fs::read(&path).await?)
    }

    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write beside the target first so readers never see a half-written snapshot.
        let staging = path.with_extension("partial");
        tokio::fs::write(&staging, data).await?;
        tokio::fs::rename(&staging, &path).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ServiceInfoError;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(storage.write_file("nightly/info.json", b"{}")).unwrap();
        assert!(temp_dir.path().join("nightly/info.json").exists());
        assert!(!temp_dir.path().join("nightly/info.partial").exists());

        let data = tokio_test::block_on(storage.read_file("nightly/info.json")).unwrap();
        assert_eq!(data, b"{}");
    }

    #[test]
    fn test_rewrite_replaces_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(storage.write_file("latest.json", b"old")).unwrap();
        tokio_test::block_on(storage.write_file("latest.json", b"new")).unwrap();

        let data = tokio_test::block_on(storage.read_file("latest.json")).unwrap();
        assert_eq!(data, b"new");
    }

    #[test]
    fn test_names_outside_root_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("inner"));

        let result = tokio_test::block_on(storage.write_file("../escape.json", b"{}"));
        assert!(matches!(
            result,
            Err(ServiceInfoError::InvalidConfigValueError { .. })
        ));
        assert!(!temp_dir.path().join("escape.json").exists());
    }
}
