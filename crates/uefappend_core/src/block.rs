//! Tape block segmentation and block headers.
//!
//! On tape a file is a series of blocks of at most [`BLOCK_SIZE`] bytes.
//! Each block is preceded by its own header:
//!
//! ```text
//! '*' '*' '*' '*' name.. '\r' flags block:u16 len-1:u8 exec:u16 load:u16
//! ```
//!
//! One 8-bit wrapping checksum covers the header and then the block data,
//! and follows the data on tape.

use crate::record::{FileRecord, MAX_NAME_LEN};
use std::slice::Chunks;
use uefappend_codec::ChecksumBuffer;

/// Largest number of payload bytes in one tape block.
pub const BLOCK_SIZE: usize = 256;

/// Longest possible block header.
pub const MAX_HEADER_SIZE: usize = 4 + MAX_NAME_LEN + 1 + 1 + 2 + 1 + 2 + 2;

const SYNC: [u8; 4] = *b"****";
const NAME_TERMINATOR: u8 = b'\r';

/// Flag byte of a block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFlags(u8);

impl BlockFlags {
    /// More blocks of this file follow.
    pub const NOT_LAST: Self = Self(0x80);
    /// The block is to be loaded into memory.
    pub const SHOULD_LOAD: Self = Self(0x40);
    /// The block is not the first of its file.
    pub const NOT_FIRST: Self = Self(0x01);

    /// Returns the flags for a block at the given position in its file.
    #[must_use]
    pub const fn for_position(is_first: bool, is_last: bool) -> Self {
        let mut bits = Self::SHOULD_LOAD.0;
        if !is_last {
            bits |= Self::NOT_LAST.0;
        }
        if !is_first {
            bits |= Self::NOT_FIRST.0;
        }
        Self(bits)
    }

    /// Returns the raw flag byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// A slice of a record's payload transcoded as one tape block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubBlock<'a> {
    /// Payload bytes, never empty and at most [`BLOCK_SIZE`] long.
    pub data: &'a [u8],
    /// Position of the block in its file, from 0.
    pub block_number: u16,
    /// Address this block loads at.
    pub load_address: u16,
    /// First block of the file.
    pub is_first: bool,
    /// Last block of the file.
    pub is_last: bool,
}

impl SubBlock<'_> {
    /// Returns the header flags for this block.
    #[must_use]
    pub const fn flags(&self) -> BlockFlags {
        BlockFlags::for_position(self.is_first, self.is_last)
    }

    /// Returns the number of payload bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the block carries no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Iterator over the tape blocks of a record.
#[derive(Debug, Clone)]
pub struct SubBlocks<'a> {
    chunks: Chunks<'a, u8>,
    count: usize,
    index: usize,
    load_address: u16,
}

impl<'a> SubBlocks<'a> {
    fn new(record: &'a FileRecord) -> Self {
        let chunks = record.data().chunks(BLOCK_SIZE);
        Self {
            count: chunks.len(),
            chunks,
            index: 0,
            load_address: record.load_address(),
        }
    }
}

impl<'a> Iterator for SubBlocks<'a> {
    type Item = SubBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.chunks.next()?;
        let block = SubBlock {
            data,
            block_number: self.index as u16,
            load_address: self.load_address,
            is_first: self.index == 0,
            is_last: self.index + 1 == self.count,
        };
        self.index += 1;
        self.load_address = self.load_address.wrapping_add(data.len() as u16);
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for SubBlocks<'_> {}

impl FileRecord {
    /// Splits the payload into tape blocks, in order.
    ///
    /// A record of `n` bytes yields `n.div_ceil(256)` blocks; an empty
    /// record yields none.
    #[must_use]
    pub fn sub_blocks(&self) -> SubBlocks<'_> {
        SubBlocks::new(self)
    }
}

/// The header written to tape ahead of each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader<'a> {
    /// File name, without terminator.
    pub name: &'a [u8],
    /// Block flags.
    pub flags: BlockFlags,
    /// Block number within the file.
    pub block_number: u16,
    /// Payload length of the block, 1..=256.
    pub data_len: usize,
    /// Execute address of the file.
    pub execute_address: u16,
    /// Load address of this block.
    pub load_address: u16,
}

impl<'a> BlockHeader<'a> {
    /// Describes `block` of `record`.
    #[must_use]
    pub fn new(record: &'a FileRecord, block: &SubBlock<'_>) -> Self {
        Self {
            name: record.name(),
            flags: block.flags(),
            block_number: block.block_number,
            data_len: block.len(),
            execute_address: record.execute_address(),
            load_address: block.load_address,
        }
    }

    /// Serializes the header, summing every byte into the checksum.
    #[must_use]
    pub fn encode(&self) -> ChecksumBuffer {
        let mut buf = ChecksumBuffer::with_capacity(MAX_HEADER_SIZE);
        buf.write_bytes(&SYNC);
        buf.write_bytes(self.name);
        buf.write_u8(NAME_TERMINATOR);
        buf.write_u8(self.flags.bits());
        buf.write_u16(self.block_number);
        // The length byte holds len-1 so that a full block fits in 8 bits.
        buf.write_u8(self.data_len.wrapping_sub(1) as u8);
        buf.write_u16(self.execute_address);
        buf.write_u16(self.load_address);
        buf
    }
}
