//! Byte accumulator with a running 8-bit checksum.

/// A growable byte buffer that sums every byte written to it.
///
/// The checksum is an 8-bit wrapping sum, as used by Acorn Atom tape
/// blocks. A block's checksum runs over its header and then its data, so
/// a second buffer can be started from the first one's sum with
/// [`ChecksumBuffer::continuing`].
///
/// ```
/// use uefappend_codec::ChecksumBuffer;
///
/// let mut header = ChecksumBuffer::new();
/// header.write_bytes(b"****");
/// assert_eq!(header.checksum(), 0xA8);
///
/// let mut data = ChecksumBuffer::continuing(header.checksum());
/// data.write_u8(0x60);
/// assert_eq!(data.into_bytes_with_checksum(), [0x60, 0x08]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumBuffer {
    buffer: Vec<u8>,
    checksum: u8,
}

impl ChecksumBuffer {
    /// Creates an empty buffer with a zero checksum.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            checksum: 0,
        }
    }

    /// Creates an empty buffer whose checksum starts at `checksum`.
    #[must_use]
    pub fn continuing(checksum: u8) -> Self {
        Self {
            buffer: Vec::new(),
            checksum,
        }
    }

    /// Appends one byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
        self.checksum = self.checksum.wrapping_add(value);
    }

    /// Appends a 16-bit value, little-endian.
    pub fn write_u16(&mut self, value: u16) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    /// Appends a run of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.reserve(bytes.len());
        for &byte in bytes {
            self.write_u8(byte);
        }
    }

    /// Returns the running checksum.
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consumes the buffer and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Consumes the buffer and returns its bytes followed by the checksum.
    #[must_use]
    pub fn into_bytes_with_checksum(mut self) -> Vec<u8> {
        self.buffer.push(self.checksum);
        self.buffer
    }
}
