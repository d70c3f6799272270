use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::reference::ConversationReference;
use crate::storage::{ObjectContainer, StoreError};

/// Characters replaced during key sanitization, plus ASCII controls.
const ILLEGAL_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Options recognized by [`RecordStore::add`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Replace an existing record instead of refusing to write.
    pub overwrite: bool,
}

/// Result of a bulk listing.
#[derive(Debug)]
pub struct PagedRecords<R> {
    pub records: Vec<R>,
    /// Always `None`: listing drains every backend page before returning.
    pub continuation_token: Option<String>,
}

/// Durable key → JSON-record store over an [`ObjectContainer`].
///
/// Records are stored as plain UTF-8 JSON under a sanitized object name.
/// Absence is a value (`None` / `false`), never an error; every other
/// backend failure propagates untouched — no retries, no backoff.
pub struct RecordStore<C, R = ConversationReference> {
    container: C,
    _record: PhantomData<fn() -> R>,
}

/// The concrete store the bot layer uses.
pub type ReferenceStore<C> = RecordStore<C, ConversationReference>;

impl<C, R> RecordStore<C, R>
where
    C: ObjectContainer,
    R: Serialize + DeserializeOwned,
{
    /// Wrap a container handle, creating the namespace if it is missing.
    pub async fn new(container: C) -> Result<Self, StoreError> {
        container.create_if_missing().await?;
        Ok(Self {
            container,
            _record: PhantomData,
        })
    }

    /// Fetch the record stored under `key`, or `None` if there is none.
    ///
    /// A present object that fails to decode is an error here, unlike in
    /// [`list`](Self::list) where such entries are skipped.
    pub async fn get(&self, key: &str) -> Result<Option<R>, StoreError> {
        let name = object_name(key)?;
        match self.container.get_object(&name).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `record` under `key`. Returns `false` when the key is already
    /// taken and `overwrite` is off.
    ///
    /// The existence check and the write are two separate backend calls;
    /// concurrent adds with `overwrite` off can both observe absence and
    /// both write, last write winning.
    pub async fn add(&self, key: &str, record: &R, options: AddOptions) -> Result<bool, StoreError> {
        let name = object_name(key)?;

        if options.overwrite || self.get(key).await?.is_none() {
            let bytes = serde_json::to_vec(record)?;
            self.container.put_object(&name, &bytes).await?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Decode every record in the namespace, starting from
    /// `continuation_token` if one is given.
    ///
    /// Entries deleted between listing and fetch, and entries that are not
    /// valid JSON for `R`, are skipped. Any other backend error aborts the
    /// whole listing. All backend pages are drained before returning, so
    /// the result's `continuation_token` is always `None`.
    pub async fn list(
        &self,
        page_size: Option<usize>,
        continuation_token: Option<&str>,
    ) -> Result<PagedRecords<R>, StoreError> {
        let mut records = Vec::new();
        let mut token = continuation_token.map(str::to_owned);

        loop {
            let page = self
                .container
                .list_objects(page_size, token.as_deref())
                .await?;

            for name in &page.names {
                match self.container.get_object(name).await {
                    Ok(bytes) => match serde_json::from_slice::<R>(&bytes) {
                        Ok(record) => records.push(record),
                        Err(e) => {
                            warn!("skipping undecodable object {}: {}", name, e);
                        }
                    },
                    // Deleted between listing and fetch.
                    Err(e) if e.is_not_found() => {}
                    Err(e) => return Err(e.into()),
                }
            }

            match page.continuation {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        Ok(PagedRecords {
            records,
            continuation_token: None,
        })
    }

    /// Delete the record under `key`. Returns `true` if something was
    /// deleted, `false` if the key did not exist.
    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let name = object_name(key)?;
        match self.container.delete_object(&name).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub fn container(&self) -> &C {
        &self.container
    }
}

/// Map a logical key to its storage object name.
///
/// Characters the backing store cannot accept in names become `_`. When
/// that rewrites the key, an 8-hex CRC32 of the raw key is appended so
/// distinct keys ("a/b", "a_b") cannot land on the same object.
fn object_name(key: &str) -> Result<String, StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey);
    }

    let sanitized: String = key
        .chars()
        .map(|c| {
            if ILLEGAL_NAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized == key {
        Ok(sanitized)
    } else {
        Ok(format!("{}-{:08x}", sanitized, crc32fast::hash(key.as_bytes())))
    }
}
