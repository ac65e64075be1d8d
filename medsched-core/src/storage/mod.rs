//! Persistence of the document in a key-value store.
//!
//! The whole [`AppData`](crate::AppData) is serialized as JSON under a single
//! key ([`STORAGE_KEY`]). Reads repair missing pieces and fall back to the
//! default document; writes that fail are logged and otherwise ignored.
//!
//! # Stores
//!
//! - [`MemoryStore`]: in-process map with an optional byte quota
//! - [`FileStore`]: one `<key>.json` file per key in a data directory

mod document;
mod error;
mod file;
mod memory;

pub use document::{DocumentStore, STORAGE_KEY};
pub use error::{PersistError, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string storage addressed by key.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
