use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::storage::container::{ObjectContainer, ObjectPage};
use crate::storage::error::StorageError;

const DEFAULT_PAGE_SIZE: usize = 1000;

/// In-memory container for tests and ephemeral embedding.
///
/// Cloning shares the underlying map, so a test can hold one handle and
/// hand another to the store.
#[derive(Clone, Default)]
pub struct MemoryContainer {
    objects: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ObjectContainer for MemoryContainer {
    async fn create_if_missing(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn get_object(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn put_object(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        self.objects
            .lock()
            .unwrap()
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete_object(&self, name: &str) -> Result<(), StorageError> {
        self.objects
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn list_objects(
        &self,
        page_size_hint: Option<usize>,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError> {
        let page_size = page_size_hint.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let objects = self.objects.lock().unwrap();

        let mut names: Vec<String> = match continuation_token {
            Some(token) => objects
                .range::<str, _>((
                    std::ops::Bound::Excluded(token),
                    std::ops::Bound::Unbounded,
                ))
                .map(|(k, _)| k.clone())
                .collect(),
            None => objects.keys().cloned().collect(),
        };

        let continuation = if names.len() > page_size {
            names.truncate(page_size);
            names.last().cloned()
        } else {
            None
        };

        Ok(ObjectPage {
            names,
            continuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let a = MemoryContainer::new();
        let b = a.clone();

        a.put_object("k", b"v").await.unwrap();
        assert_eq!(b.get_object("k").await.unwrap(), b"v");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let c = MemoryContainer::new();
        assert!(c.get_object("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn paging_resumes_after_token() {
        let c = MemoryContainer::new();
        for name in ["a", "b", "c"] {
            c.put_object(name, b"{}").await.unwrap();
        }

        let first = c.list_objects(Some(2), None).await.unwrap();
        assert_eq!(first.names, vec!["a", "b"]);

        let rest = c
            .list_objects(Some(2), first.continuation.as_deref())
            .await
            .unwrap();
        assert_eq!(rest.names, vec!["c"]);
        assert!(rest.continuation.is_none());
    }
}
