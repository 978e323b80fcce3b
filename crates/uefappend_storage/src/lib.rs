//! # uefappend Storage
//!
//! Append-only byte sinks for UEF containers.
//!
//! Storage backends are **opaque byte stores** - they do not interpret
//! the data they store. The codec and core crates own every byte of the
//! container format; a backend only ever grows.
//!
//! ## Design Principles
//!
//! - Backends are simple byte stores (read, append, flush)
//! - No knowledge of UEF signatures, chunks or tape blocks
//! - Bytes before the current end are never rewritten
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and in-process conversion
//! - [`FileBackend`] - For container files on disk
//!
//! ## Example
//!
//! ```rust
//! use uefappend_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! let offset = backend.append(b"UEF File!\0").unwrap();
//! let data = backend.read_at(offset, 9).unwrap();
//! assert_eq!(&data, b"UEF File!");
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
