//! ATM record parsing.
//!
//! An ATM stream is a sequence of records, each a 22-byte header followed
//! by the file contents:
//!
//! | offset | size | field                          |
//! |--------|------|--------------------------------|
//! | 0      | 16   | name, NUL padded               |
//! | 16     | 2    | load address (LE)              |
//! | 18     | 2    | execute address (LE)           |
//! | 20     | 2    | payload length (LE)            |
//! | 22     | len  | payload                        |
//!
//! A TAP file is the same records back to back, so the reader keeps going
//! until the input ends inside a header.

use crate::error::{CoreError, CoreResult};
use std::borrow::Cow;
use std::io::{ErrorKind, Read};

/// Size of the name field in a record header.
pub const NAME_FIELD_SIZE: usize = 16;

/// Longest name kept from the name field.
pub const MAX_NAME_LEN: usize = 14;

/// Size of a record header.
pub const RECORD_HEADER_SIZE: usize = NAME_FIELD_SIZE + 6;

/// One named file from an ATM or TAP stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    name: Vec<u8>,
    load_address: u16,
    execute_address: u16,
    data: Vec<u8>,
}

impl FileRecord {
    /// Creates a record.
    ///
    /// The name is cut at its first NUL and at [`MAX_NAME_LEN`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::RecordTooLarge`] if `data` is longer than
    /// `u16::MAX` bytes.
    pub fn new(
        name: &[u8],
        load_address: u16,
        execute_address: u16,
        data: Vec<u8>,
    ) -> CoreResult<Self> {
        if data.len() > usize::from(u16::MAX) {
            return Err(CoreError::RecordTooLarge { len: data.len() });
        }
        Ok(Self {
            name: effective_name(name).to_vec(),
            load_address,
            execute_address,
            data,
        })
    }

    /// Returns the name bytes as written to block headers.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Returns the name for display.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns the address the file loads at.
    #[must_use]
    pub const fn load_address(&self) -> u16 {
        self.load_address
    }

    /// Returns the address execution starts at.
    #[must_use]
    pub const fn execute_address(&self) -> u16 {
        self.execute_address
    }

    /// Returns the file contents.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the payload length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the record has no payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn effective_name(field: &[u8]) -> &[u8] {
    let field = &field[..field.len().min(MAX_NAME_LEN)];
    match field.iter().position(|&b| b == 0) {
        Some(end) => &field[..end],
        None => field,
    }
}

/// Reads [`FileRecord`]s from an ATM or TAP stream.
///
/// The end of the stream is detected by a header that cannot be read in
/// full; that is the normal way for a stream to end, not an error.
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// Creates a reader over `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner, done: false }
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` once the input ends inside (or right before) a
    /// record header.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TruncatedRecord`] if the payload is shorter
    /// than its header declares, or an I/O error from the input.
    pub fn next_record(&mut self) -> CoreResult<Option<FileRecord>> {
        if self.done {
            return Ok(None);
        }

        let mut header = [0u8; RECORD_HEADER_SIZE];
        if read_up_to(&mut self.inner, &mut header)? < RECORD_HEADER_SIZE {
            self.done = true;
            return Ok(None);
        }

        let name = effective_name(&header[..NAME_FIELD_SIZE]).to_vec();
        let load_address = u16::from_le_bytes([header[16], header[17]]);
        let execute_address = u16::from_le_bytes([header[18], header[19]]);
        let length = usize::from(u16::from_le_bytes([header[20], header[21]]));

        let mut data = vec![0u8; length];
        let actual = read_up_to(&mut self.inner, &mut data)?;
        if actual < length {
            self.done = true;
            return Err(CoreError::TruncatedRecord {
                name: String::from_utf8_lossy(&name).into_owned(),
                expected: length,
                actual,
            });
        }

        Ok(Some(FileRecord {
            name,
            load_address,
            execute_address,
            data,
        }))
    }

    /// Consumes the reader and returns the input.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = CoreResult<FileRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Fills `buf` as far as the input allows, returning the bytes read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> CoreResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(CoreError::InputRead(err)),
        }
    }
    Ok(filled)
}
