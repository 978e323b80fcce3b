//! UEF chunk identifiers and the chunk encoder.

use crate::error::CodecResult;
use crate::writer::ByteWriter;
use uefappend_storage::StorageBackend;

/// Encoding descriptor prefixed to every data chunk payload.
///
/// 8 data bits, parity `'N'` (none), stop-bit count -1 (one short stop
/// bit), i.e. the Atom's 8N1 framing.
pub const DATA_DESCRIPTOR: [u8; 3] = [8, b'N', 0xFF];

/// Chunk types written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ChunkId {
    /// Data block with an explicit bit-level encoding descriptor.
    Data = 0x0104,
    /// Carrier tone, duration in cycles of the 2400 Hz tone.
    CarrierTone = 0x0110,
    /// Silence between files.
    Gap = 0x0112,
    /// Baud rate for subsequent data.
    BaudRate = 0x0117,
}

impl ChunkId {
    /// Converts a raw id to a known chunk type.
    #[must_use]
    pub fn from_u16(id: u16) -> Option<Self> {
        match id {
            0x0104 => Some(Self::Data),
            0x0110 => Some(Self::CarrierTone),
            0x0112 => Some(Self::Gap),
            0x0117 => Some(Self::BaudRate),
            _ => None,
        }
    }

    /// Returns the raw chunk id.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Emits well-formed UEF chunks through a [`ByteWriter`].
#[derive(Debug)]
pub struct ChunkEncoder<B> {
    writer: ByteWriter<B>,
}

impl<B: StorageBackend> ChunkEncoder<B> {
    /// Wraps a byte writer.
    pub fn new(writer: ByteWriter<B>) -> Self {
        Self { writer }
    }

    /// Emits a carrier tone chunk of `duration` cycles.
    pub fn write_carrier_tone(&mut self, duration: u16) -> CodecResult<()> {
        self.write_u16_chunk(ChunkId::CarrierTone, duration)
    }

    /// Emits a gap chunk of `duration` units.
    pub fn write_gap(&mut self, duration: u16) -> CodecResult<()> {
        self.write_u16_chunk(ChunkId::Gap, duration)
    }

    /// Emits a baud-rate chunk.
    pub fn write_baud_rate(&mut self, rate: u16) -> CodecResult<()> {
        self.write_u16_chunk(ChunkId::BaudRate, rate)
    }

    /// Emits a data chunk: [`DATA_DESCRIPTOR`] followed by `bytes`.
    ///
    /// The chunk length is `bytes.len() + 3`.
    pub fn write_data(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.writer
            .write_chunk_parts(ChunkId::Data.as_u16(), &[&DATA_DESCRIPTOR, bytes])?;
        Ok(())
    }

    fn write_u16_chunk(&mut self, id: ChunkId, value: u16) -> CodecResult<()> {
        self.writer.write_chunk(id.as_u16(), &value.to_le_bytes())?;
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &ByteWriter<B> {
        &self.writer
    }

    /// Returns the underlying writer mutably, for writing outside chunks.
    pub fn writer_mut(&mut self) -> &mut ByteWriter<B> {
        &mut self.writer
    }

    /// Consumes the encoder and returns the writer.
    pub fn into_inner(self) -> ByteWriter<B> {
        self.writer
    }
}
