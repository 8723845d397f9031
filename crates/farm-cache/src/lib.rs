//! Type-safe Key-Value persistence layer for SmartFarm.
//!
//! Provides a small byte-level [`Store`] abstraction with interchangeable
//! backends and a [`Cache`] wrapper that adds JSON serialization.
//!
//! - [`MemoryStore`]: shared in-process map (tests, embedding).
//! - [`FileStore`]: one file per key in a directory (native CLI).
//! - `SpinStore`: Spin's Key-Value Store (`wasm32` only).
//!
//! # Example
//!
//! ```
//! use farm_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("smartfarm_cart", &vec![1, 2, 3]).unwrap();
//!
//! // Retrieve a value
//! let ids: Option<Vec<u32>> = cache.get("smartfarm_cart").unwrap();
//! assert_eq!(ids, Some(vec![1, 2, 3]));
//!
//! // Delete a value
//! cache.delete("smartfarm_cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
#[cfg(target_arch = "wasm32")]
mod spin;
mod store;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;
pub use store::{MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
