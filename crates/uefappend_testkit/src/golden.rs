//! Container inspection helpers for assertions.
//!
//! These split a container body into chunks so tests can assert on chunk
//! ids and payloads instead of raw offsets.

use std::fmt;

/// A chunk as found in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk id.
    pub id: u16,
    /// Chunk payload.
    pub payload: Vec<u8>,
}

/// A container body that does not split into whole chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitError {
    /// Offset of the chunk that could not be read.
    pub offset: usize,
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "incomplete chunk at offset {}", self.offset)
    }
}

impl std::error::Error for SplitError {}

/// Splits a sequence of `{id:u16, len:u32, payload}` chunks.
///
/// `bytes` must start at a chunk boundary, i.e. after the 12-byte
/// preamble of a container.
///
/// # Errors
///
/// Returns [`SplitError`] if the bytes end inside a chunk.
pub fn split_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, SplitError> {
    let mut chunks = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + 6)
            .ok_or(SplitError { offset })?;
        let id = u16::from_le_bytes([header[0], header[1]]);
        let len = u32::from_le_bytes([header[2], header[3], header[4], header[5]]) as usize;
        let payload = bytes
            .get(offset + 6..offset + 6 + len)
            .ok_or(SplitError { offset })?;

        chunks.push(Chunk {
            id,
            payload: payload.to_vec(),
        });
        offset += 6 + len;
    }

    Ok(chunks)
}

/// Encodes bytes as hexadecimal string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hexadecimal string to bytes, ignoring whitespace.
///
/// # Panics
///
/// Panics on characters that are not hex digits.
#[must_use]
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

/// Asserts two byte strings are equal, reporting both in hex.
///
/// # Panics
///
/// Panics if the bytes differ.
pub fn assert_bytes_eq(actual: &[u8], expected: &[u8]) {
    if actual != expected {
        let first_diff = actual
            .iter()
            .zip(expected)
            .position(|(a, e)| a != e)
            .unwrap_or(actual.len().min(expected.len()));
        panic!(
            "byte mismatch at offset {}:\n\
             Expected ({} bytes): {}\n\
             Actual ({} bytes): {}",
            first_diff,
            expected.len(),
            hex_encode(expected),
            actual.len(),
            hex_encode(actual)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_two_chunks() {
        let bytes = [0x10, 0x01, 2, 0, 0, 0, 0x60, 0x09, 0x12, 0x01, 0, 0, 0, 0];
        let chunks = split_chunks(&bytes).unwrap();
        assert_eq!(
            chunks,
            [
                Chunk {
                    id: 0x0110,
                    payload: vec![0x60, 0x09]
                },
                Chunk {
                    id: 0x0112,
                    payload: vec![]
                },
            ]
        );
    }

    #[test]
    fn split_rejects_partial_chunk() {
        let bytes = [0x10, 0x01, 4, 0, 0, 0, 0x60];
        assert_eq!(split_chunks(&bytes), Err(SplitError { offset: 0 }));
        assert_eq!(split_chunks(&[0x10]), Err(SplitError { offset: 0 }));
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(hex_encode(&[0x00, 0xAB, 0x10]), "00ab10");
        assert_eq!(hex_decode("00 ab\n10"), [0x00, 0xAB, 0x10]);
    }
}
