//! # uefappend Codec
//!
//! Byte-level encoding of UEF containers.
//!
//! A UEF container is a 12-byte preamble followed by self-describing
//! chunks. Every chunk is framed as:
//!
//! | field   | size | encoding      |
//! |---------|------|---------------|
//! | id      | 2    | little-endian |
//! | length  | 4    | little-endian |
//! | payload | len  | raw bytes     |
//!
//! so a reader can skip any chunk without understanding it.
//!
//! This crate provides:
//! - [`ByteWriter`] - little-endian primitives and chunk framing over a
//!   [`StorageBackend`](uefappend_storage::StorageBackend)
//! - [`ChunkEncoder`] - the tone, gap, baud-rate and data chunks
//! - [`ChecksumBuffer`] - a byte accumulator with a running 8-bit sum
//!
//! ## Usage
//!
//! ```
//! use uefappend_codec::{ByteWriter, ChunkEncoder};
//! use uefappend_storage::InMemoryBackend;
//!
//! let mut encoder = ChunkEncoder::new(ByteWriter::new(InMemoryBackend::new()));
//! encoder.write_carrier_tone(2400).unwrap();
//!
//! let bytes = encoder.into_inner().into_inner().into_data();
//! assert_eq!(bytes, [0x10, 0x01, 2, 0, 0, 0, 0x60, 0x09]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod checksum;
mod chunk;
mod error;
mod format;
mod writer;

pub use checksum::ChecksumBuffer;
pub use chunk::{ChunkEncoder, ChunkId, DATA_DESCRIPTOR};
pub use error::{CodecError, CodecResult};
pub use format::{ContainerVersion, CHUNK_HEADER_SIZE, SIGNATURE};
pub use writer::ByteWriter;
