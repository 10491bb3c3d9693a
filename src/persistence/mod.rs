//! Save/load persistence
//!
//! Handles:
//! - A key/value seam (`KeyValueStore`) with memory, file and LocalStorage backends
//! - Unlocked-level progress as one integer under a fixed key
//! - Malformed or missing values fall back to defaults instead of failing

pub mod progress;
pub mod store;

pub use progress::{PROGRESS_KEY, Progress};
pub use store::{KeyValueStore, MemoryStore};

#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
