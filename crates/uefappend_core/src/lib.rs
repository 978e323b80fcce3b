//! # uefappend Core
//!
//! Transcodes Acorn Atom ATM/TAP file images into UEF tape chunks.
//!
//! This crate provides:
//! - [`RecordReader`] - parses the 22-byte ATM header and payload
//! - [`SubBlocks`] and [`BlockHeader`] - 256-byte tape block segmentation
//! - [`BlockTranscoder`] - emits tone, header, tone, data per block
//! - [`ContainerSession`] - the append-or-create container lifecycle
//!
//! ## Usage
//!
//! ```
//! use uefappend_core::{Config, ContainerSession};
//! use uefappend_storage::InMemoryBackend;
//!
//! let mut session = ContainerSession::with_backend(InMemoryBackend::new(), Config::default()).unwrap();
//! session.ensure_header().unwrap();
//!
//! let mut atm = Vec::new();
//! atm.extend_from_slice(b"HELLO\0\0\0\0\0\0\0\0\0\0\0");
//! atm.extend_from_slice(&[0x00, 0x29, 0x00, 0x29, 0x02, 0x00, 0x41, 0x42]);
//!
//! let summary = session.append_reader(atm.as_slice()).unwrap();
//! assert_eq!(summary.records, 1);
//! assert_eq!(summary.blocks, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod block;
mod config;
mod error;
mod record;
mod session;
mod transcoder;

pub use block::{BlockFlags, BlockHeader, SubBlock, SubBlocks, BLOCK_SIZE, MAX_HEADER_SIZE};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use record::{FileRecord, RecordReader, MAX_NAME_LEN, NAME_FIELD_SIZE, RECORD_HEADER_SIZE};
pub use session::{AppendOutcome, ContainerSession};
pub use transcoder::{BlockTranscoder, TranscodeSummary};
