//! Hand-assembled reference containers.
//!
//! Each vector is written out byte by byte from the UEF and Atom tape
//! formats, independently of the encoder, so it can catch mistakes that
//! a test derived from the encoder's own helpers would repeat.

use crate::fixtures::AtmBuilder;
use crate::golden::hex_decode;

/// An input image and the container it must produce.
#[derive(Debug, Clone)]
pub struct ContainerVector {
    /// Short identifier.
    pub id: &'static str,
    /// ATM input.
    pub input: Vec<u8>,
    /// Complete container produced from an empty target.
    pub expected: Vec<u8>,
}

/// "HELLO": ten bytes of `A` at `0x1900`, written to a new container.
#[must_use]
pub fn hello_vector() -> ContainerVector {
    ContainerVector {
        id: "hello",
        input: AtmBuilder::new()
            .record(b"HELLO", 0x1900, 0x1900, &[0x41; 10])
            .build(),
        expected: hex_decode(
            "
            55 45 46 20 46 69 6c 65 21 00  0a 00
            17 01 02 00 00 00  2c 01
            10 01 02 00 00 00  30 2a
            04 01 15 00 00 00  08 4e ff
               2a 2a 2a 2a 48 45 4c 4c 4f 0d
               40 00 00 09 00 19 00 19
            10 01 02 00 00 00  60 09
            04 01 0e 00 00 00  08 4e ff
               41 41 41 41 41 41 41 41 41 41  2e
            ",
        ),
    }
}

/// The chunks appended for a one-byte record `X` at `0x2900` when the
/// container already holds a record: gap, tone, header, tone, data.
#[must_use]
pub fn appended_x_chunks() -> Vec<u8> {
    // header checksum: 0xa8 + 'X' + '\r' + 0x40 + 0x29 + 0x29 = 0x19f
    // data checksum: 0x9f + 0x07 = 0xa6
    hex_decode(
        "
        12 01 02 00 00 00  b0 04
        10 01 02 00 00 00  30 2a
        04 01 11 00 00 00  08 4e ff
           2a 2a 2a 2a 58 0d
           40 00 00 00 00 29 00 29
        10 01 02 00 00 00  60 09
        04 01 05 00 00 00  08 4e ff  07 a6
        ",
    )
}

/// ATM input for [`appended_x_chunks`].
#[must_use]
pub fn x_input() -> Vec<u8> {
    AtmBuilder::new().record(b"X", 0x2900, 0x2900, &[0x07]).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_vector_lengths() {
        let v = hello_vector();
        assert_eq!(v.input.len(), 22 + 10);
        assert_eq!(v.expected.len(), 12 + 8 + 8 + (6 + 21) + 8 + (6 + 14));
    }

    #[test]
    fn appended_chunks_split_cleanly() {
        let chunks = crate::golden::split_chunks(&appended_x_chunks()).unwrap();
        let ids: Vec<u16> = chunks.iter().map(|c| c.id).collect();
        assert_eq!(ids, [0x0112, 0x0110, 0x0104, 0x0110, 0x0104]);
    }
}
