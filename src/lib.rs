pub mod config;
pub mod reference;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use reference::{ChannelAccount, ConversationAccount, ConversationReference};
pub use storage::{
    LocalContainer, MemoryContainer, ObjectContainer, ObjectPage, StorageError, StoreError,
};
pub use store::{AddOptions, PagedRecords, RecordStore, ReferenceStore};
