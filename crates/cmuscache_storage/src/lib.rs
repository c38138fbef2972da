//! # cmuscache storage
//!
//! Read-only byte sources for cmus metadata cache files.
//!
//! Backends are **opaque byte stores**: they hand out bytes by offset and
//! report their size, and know nothing about the cache format. All format
//! interpretation lives in `cmuscache_core`.
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For tests and synthetic caches
//! - [`FileBackend`] - A file opened read-only through OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use cmuscache_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::with_data(b"hello world".to_vec());
//! let data = backend.read_at(6, 5).unwrap();
//! assert_eq!(&data, b"world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
