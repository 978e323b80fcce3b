//! Little-endian byte emission over a storage backend.

use crate::error::{CodecError, CodecResult};
use crate::format::CHUNK_HEADER_SIZE;
use bytes::{BufMut, BytesMut};
use uefappend_storage::StorageBackend;

/// Writes raw bytes, little-endian integers and framed chunks to a
/// [`StorageBackend`].
///
/// Each call is fully written before it returns. Failures of the
/// underlying sink are propagated unchanged; there is no retry.
#[derive(Debug)]
pub struct ByteWriter<B> {
    backend: B,
}

impl<B: StorageBackend> ByteWriter<B> {
    /// Creates a writer that appends to `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.backend.append(bytes)?;
        Ok(())
    }

    /// Appends a single byte.
    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.write_bytes(&[value])
    }

    /// Appends a 16-bit value, little-endian.
    pub fn write_u16(&mut self, value: u16) -> CodecResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Appends a 32-bit value, little-endian.
    pub fn write_u32(&mut self, value: u32) -> CodecResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Appends a complete chunk: id, payload length, payload.
    ///
    /// Returns the offset of the chunk's first byte.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ChunkTooLarge`] if the payload does not fit
    /// the 32-bit length field, or a storage error from the sink.
    pub fn write_chunk(&mut self, id: u16, payload: &[u8]) -> CodecResult<u64> {
        self.write_chunk_parts(id, &[payload])
    }

    /// Appends a chunk whose payload is the concatenation of `parts`.
    ///
    /// The frame is assembled in memory and handed to the backend in a
    /// single append.
    pub fn write_chunk_parts(&mut self, id: u16, parts: &[&[u8]]) -> CodecResult<u64> {
        let payload_len: usize = parts.iter().map(|part| part.len()).sum();
        let len = u32::try_from(payload_len).map_err(|_| CodecError::ChunkTooLarge {
            id,
            len: payload_len,
        })?;

        let mut frame = BytesMut::with_capacity(CHUNK_HEADER_SIZE + payload_len);
        frame.put_u16_le(id);
        frame.put_u32_le(len);
        for part in parts {
            frame.put_slice(part);
        }

        Ok(self.backend.append(&frame)?)
    }

    /// Returns the number of bytes in the sink, i.e. the next write offset.
    pub fn position(&self) -> CodecResult<u64> {
        Ok(self.backend.size()?)
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> CodecResult<()> {
        self.backend.flush()?;
        Ok(())
    }

    /// Flushes the sink and makes its contents durable.
    pub fn sync(&mut self) -> CodecResult<()> {
        self.backend.flush()?;
        self.backend.sync()?;
        Ok(())
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uefappend_storage::InMemoryBackend;

    fn writer() -> ByteWriter<InMemoryBackend> {
        ByteWriter::new(InMemoryBackend::new())
    }

    #[test]
    fn integers_are_little_endian() {
        let mut w = writer();
        w.write_u8(0xAB).unwrap();
        w.write_u16(0x1234).unwrap();
        w.write_u32(0xDEAD_BEEF).unwrap();

        assert_eq!(
            w.into_inner().into_data(),
            [0xAB, 0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE]
        );
    }

    #[test]
    fn chunk_length_matches_payload() {
        let mut w = writer();
        let offset = w.write_chunk(0x0104, b"abc").unwrap();
        assert_eq!(offset, 0);

        assert_eq!(
            w.into_inner().into_data(),
            [0x04, 0x01, 3, 0, 0, 0, b'a', b'b', b'c']
        );
    }

    #[test]
    fn chunk_parts_are_concatenated() {
        let mut w = writer();
        w.write_bytes(b"xx").unwrap();
        let offset = w.write_chunk_parts(0x0110, &[&[1, 2], &[], &[3]]).unwrap();
        assert_eq!(offset, 2);
        assert_eq!(w.position().unwrap(), 2 + 6 + 3);

        assert_eq!(
            w.into_inner().into_data(),
            [b'x', b'x', 0x10, 0x01, 3, 0, 0, 0, 1, 2, 3]
        );
    }

    #[test]
    fn chunk_frame_matches_field_writes() {
        let mut framed = writer();
        framed.write_chunk(0x0117, &[0x2C, 0x01]).unwrap();

        let mut fields = writer();
        fields.write_u16(0x0117).unwrap();
        fields.write_u32(2).unwrap();
        fields.write_u16(300).unwrap();

        assert_eq!(framed.into_inner().into_data(), fields.into_inner().into_data());
    }

    #[test]
    fn empty_chunk_has_zero_length() {
        let mut w = writer();
        w.write_chunk(0x0112, &[]).unwrap();
        assert_eq!(w.into_inner().into_data(), [0x12, 0x01, 0, 0, 0, 0]);
    }
}
