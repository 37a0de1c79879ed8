//! # Key-value storage abstraction
//!
//! The front-end persists exactly two things between page loads: the bearer
//! token and the serialized profile of the signed-in user. Both live behind
//! [`KeyValueStore`] so the session logic in the `api` crate runs unchanged
//! against the browser's `localStorage` ([`crate::LocalStorageStore`]) or an
//! in-process map ([`crate::MemoryStore`]) on native targets and in tests.

use thiserror::Error;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backend is not reachable (no window, storage disabled by the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backend refused the write (quota exceeded, private mode).
    #[error("storage write rejected for key `{key}`: {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove both session keys.
    fn clear_session(&self) -> Result<(), StorageError> {
        self.remove(TOKEN_KEY)?;
        self.remove(USER_KEY)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
