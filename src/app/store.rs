//! Local artifact store over a single flat directory
//!
//! The store exclusively owns artifact lifecycle: it creates, overwrites,
//! lists, and deletes files. Writes use the temp-file-plus-rename pattern so
//! a concurrent reader observes either the whole artifact or none of it;
//! a crash mid-write leaves only a `.tmp` file, which `list()` deliberately
//! reports so the sweeper can purge it.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::constants::files;
use crate::errors::{StoreError, StoreResult};

/// Flat-directory artifact store
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `root`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DirectoryNotWritable` if the directory cannot
    /// be created. This is the fatal environment error: the pipeline cannot
    /// make meaningful progress without a writable store.
    pub fn create(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StoreError::DirectoryNotWritable {
            path: root.clone(),
            source,
        })?;
        info!("Data store ready at {}", root.display());
        Ok(Self { root })
    }

    /// The directory this store writes into
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the artifact with the given filename
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Write an artifact, fully or not at all
    ///
    /// Content lands in `<filename>.tmp` first and is renamed into place,
    /// so no partial-prefix write is ever visible under the final name.
    /// An existing artifact with the same name is overwritten.
    pub async fn put(&self, filename: &str, bytes: &[u8]) -> StoreResult<()> {
        Self::check_filename(filename)?;

        let final_path = self.path_of(filename);
        let temp_path = self
            .root
            .join(format!("{}{}", filename, files::TEMP_FILE_SUFFIX));

        let mut file = File::create(&temp_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &final_path).await?;
        debug!(
            "Stored {} ({} bytes)",
            final_path.display(),
            bytes.len()
        );
        Ok(())
    }

    /// Filenames of all regular files currently resident
    ///
    /// Stale `.tmp` files from interrupted runs are included on purpose:
    /// they fail validation and get purged by the sweeper.
    pub async fn list(&self) -> StoreResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut filenames = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    filenames.push(name.to_string());
                }
            }
        }

        filenames.sort();
        Ok(filenames)
    }

    /// Delete an artifact by filename
    pub async fn delete(&self, filename: &str) -> StoreResult<()> {
        Self::check_filename(filename)?;
        tokio::fs::remove_file(self.path_of(filename)).await?;
        debug!("Deleted artifact '{}'", filename);
        Ok(())
    }

    /// Reject filenames that would escape the store directory
    fn check_filename(filename: &str) -> StoreResult<()> {
        if filename.is_empty()
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StoreError::InvalidFilename {
                name: filename.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_then_list() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        store.put("a.parquet", b"payload").await.unwrap();
        store.put("b.parquet", b"payload").await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec!["a.parquet", "b.parquet"]);
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        store.put("a.parquet", b"payload").await.unwrap();

        let listed = store.list().await.unwrap();
        assert!(!listed.iter().any(|name| name.ends_with(".tmp")));
    }

    #[tokio::test]
    async fn test_put_overwrites_existing() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        store.put("a.parquet", b"first").await.unwrap();
        store.put("a.parquet", b"second").await.unwrap();

        let content = tokio::fs::read(store.path_of("a.parquet")).await.unwrap();
        assert_eq!(content, b"second");
    }

    #[tokio::test]
    async fn test_delete_removes_artifact() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        store.put("a.parquet", b"payload").await.unwrap();
        store.delete("a.parquet").await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_includes_stale_temp_files() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        // Simulate a write interrupted before the rename
        tokio::fs::write(dir.path().join("a.parquet.tmp"), b"part")
            .await
            .unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec!["a.parquet.tmp"]);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = DataStore::create(dir.path()).unwrap();

        for name in ["../escape", "a/b.parquet", "", ".."] {
            let result = store.put(name, b"payload").await;
            assert!(
                matches!(result, Err(StoreError::InvalidFilename { .. })),
                "expected rejection for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_create_fails_on_unwritable_path() {
        // A file in the way of the directory path makes creation fail
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let result = DataStore::create(blocker.join("store"));
        assert!(matches!(
            result,
            Err(StoreError::DirectoryNotWritable { .. })
        ));
    }
}
