//! Error types for uefappend core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while appending to a container.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] uefappend_storage::StorageError),

    /// Chunk encoding error.
    #[error("codec error: {0}")]
    Codec(#[from] uefappend_codec::CodecError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file could not be read.
    #[error("could not read input: {0}")]
    InputRead(#[source] io::Error),

    /// The container exists but does not start with the UEF signature.
    #[error("container exists but is not a UEF file")]
    WrongFileType,

    /// The container could not be opened for appending.
    #[error("could not open {} for writing: {source}", path.display())]
    CannotWrite {
        /// Path of the container.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: uefappend_storage::StorageError,
    },

    /// A record's payload ended before its declared length.
    #[error("record {name:?} is truncated: expected {expected} bytes, found {actual}")]
    TruncatedRecord {
        /// Record name.
        name: String,
        /// Declared payload length.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A record payload is longer than the 16-bit length field allows.
    #[error("record payload of {len} bytes exceeds the 16-bit length field")]
    RecordTooLarge {
        /// Payload length.
        len: usize,
    },
}

impl CoreError {
    /// Returns true if the error is confined to a single input and the
    /// container is still consistent.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputRead(_) | Self::TruncatedRecord { .. } | Self::RecordTooLarge { .. }
        )
    }
}
