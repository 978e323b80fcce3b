//! Error types for the codec crate.

use thiserror::Error;
use uefappend_storage::StorageError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding a container.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The output sink rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The chunk payload does not fit in the 32-bit length field.
    #[error("chunk {id:#06x} payload of {len} bytes exceeds the 32-bit length field")]
    ChunkTooLarge {
        /// Chunk identifier.
        id: u16,
        /// Payload length that was requested.
        len: usize,
    },
}
