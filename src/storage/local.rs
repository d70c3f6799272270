use std::path::PathBuf;

use tokio::fs;

use crate::storage::container::{ObjectContainer, ObjectPage};
use crate::storage::error::StorageError;

/// Page size used when the caller gives no hint.
const DEFAULT_PAGE_SIZE: usize = 1000;

/// Directory-backed container: one file per object, flat namespace.
///
/// Listing is lexicographic; the continuation token is the last name of the
/// previous page, so paging stays stable across concurrent writes.
pub struct LocalContainer {
    root: PathBuf,
}

impl LocalContainer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    async fn sorted_names(&self) -> Result<Vec<String>, StorageError> {
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(StorageError::Io)?;

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(StorageError::Io)? {
            let file_type = entry.file_type().await.map_err(StorageError::Io)?;
            if file_type.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[async_trait::async_trait]
impl ObjectContainer for LocalContainer {
    async fn create_if_missing(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::Io)?;
        Ok(())
    }

    async fn get_object(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        fs::read(self.object_path(name))
            .await
            .map_err(|e| StorageError::from_io(name, e))
    }

    async fn put_object(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        fs::write(self.object_path(name), data)
            .await
            .map_err(StorageError::Io)
    }

    async fn delete_object(&self, name: &str) -> Result<(), StorageError> {
        fs::remove_file(self.object_path(name))
            .await
            .map_err(|e| StorageError::from_io(name, e))
    }

    async fn list_objects(
        &self,
        page_size_hint: Option<usize>,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError> {
        let page_size = page_size_hint.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let names = self.sorted_names().await?;

        let start = match continuation_token {
            Some(token) => names.partition_point(|n| n.as_str() <= token),
            None => 0,
        };
        let remaining = &names[start..];
        let page: Vec<String> = remaining.iter().take(page_size).cloned().collect();
        let continuation = if remaining.len() > page.len() {
            page.last().cloned()
        } else {
            None
        };

        Ok(ObjectPage {
            names: page,
            continuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn container() -> (LocalContainer, TempDir) {
        let dir = TempDir::new().unwrap();
        (LocalContainer::new(dir.path().join("refs")), dir)
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();

        c.put_object("a", b"hello").await.unwrap();
        assert_eq!(c.get_object("a").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();

        let err = c.get_object("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();

        let err = c.delete_object("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_if_missing_is_idempotent() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();
        c.create_if_missing().await.unwrap();
    }

    #[tokio::test]
    async fn listing_pages_in_order() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();

        for name in ["a", "b", "c", "d", "e"] {
            c.put_object(name, b"{}").await.unwrap();
        }

        let first = c.list_objects(Some(2), None).await.unwrap();
        assert_eq!(first.names, vec!["a", "b"]);
        let token = first.continuation.unwrap();

        let second = c.list_objects(Some(2), Some(&token)).await.unwrap();
        assert_eq!(second.names, vec!["c", "d"]);
        let token = second.continuation.unwrap();

        let last = c.list_objects(Some(2), Some(&token)).await.unwrap();
        assert_eq!(last.names, vec!["e"]);
        assert!(last.continuation.is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_contents() {
        let (c, _dir) = container();
        c.create_if_missing().await.unwrap();

        c.put_object("a", b"one").await.unwrap();
        c.put_object("a", b"two").await.unwrap();
        assert_eq!(c.get_object("a").await.unwrap(), b"two");
    }
}
