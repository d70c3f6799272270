use async_trait::async_trait;

use crate::storage::error::StorageError;

/// One page of object names from a listing.
#[derive(Debug, Default)]
pub struct ObjectPage {
    pub names: Vec<String>,
    /// Token for the next page, `None` when this page is the last.
    pub continuation: Option<String>,
}

/// Backing-store capability: a flat namespace of named byte objects.
///
/// Absence is signaled with `StorageError::NotFound` on get and delete so
/// callers can translate it without string matching. `put_object` always
/// overwrites. `page_size_hint` is a hint to the backend, not a contract.
#[async_trait]
pub trait ObjectContainer: Send + Sync {
    /// Create the namespace if it does not exist yet. Idempotent.
    async fn create_if_missing(&self) -> Result<(), StorageError>;

    async fn get_object(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    async fn put_object(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    async fn delete_object(&self, name: &str) -> Result<(), StorageError>;

    async fn list_objects(
        &self,
        page_size_hint: Option<usize>,
        continuation_token: Option<&str>,
    ) -> Result<ObjectPage, StorageError>;
}
