//! Client-side persisted state and application configuration.

pub mod config;
pub mod storage;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::AppConfig;
pub use storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};
