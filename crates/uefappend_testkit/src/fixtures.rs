//! Input image builders and temporary workspaces.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Size of the name field in an ATM header.
const NAME_FIELD: usize = 16;

/// Builds ATM/TAP byte images record by record.
///
/// ```
/// use uefappend_testkit::AtmBuilder;
///
/// let atm = AtmBuilder::new().record(b"DEMO", 0x2900, 0x2900, &[1, 2]).build();
/// assert_eq!(atm.len(), 22 + 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AtmBuilder {
    bytes: Vec<u8>,
}

impl AtmBuilder {
    /// Creates an empty image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. `name` is NUL padded (or cut) to 16 bytes.
    ///
    /// # Panics
    ///
    /// Panics if `data` is longer than the 16-bit length field allows.
    #[must_use]
    pub fn record(self, name: &[u8], load: u16, exec: u16, data: &[u8]) -> Self {
        let len = u16::try_from(data.len()).expect("ATM payload must fit in 16 bits");
        self.raw_record(name, load, exec, len, data)
    }

    /// Appends a record whose declared length need not match `data`.
    #[must_use]
    pub fn raw_record(mut self, name: &[u8], load: u16, exec: u16, len: u16, data: &[u8]) -> Self {
        let mut field = [0u8; NAME_FIELD];
        let n = name.len().min(NAME_FIELD);
        field[..n].copy_from_slice(&name[..n]);

        self.bytes.extend_from_slice(&field);
        self.bytes.extend_from_slice(&load.to_le_bytes());
        self.bytes.extend_from_slice(&exec.to_le_bytes());
        self.bytes.extend_from_slice(&len.to_le_bytes());
        self.bytes.extend_from_slice(data);
        self
    }

    /// Returns the image.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// A temporary directory holding a container and its inputs.
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the path of the container file (not created).
    #[must_use]
    pub fn container_path(&self) -> PathBuf {
        self.dir.path().join("tape.uef")
    }

    /// Writes an input file and returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_input(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, bytes).expect("Failed to write input file");
        path
    }

    /// Reads the container file.
    ///
    /// # Panics
    ///
    /// Panics if the container does not exist.
    #[must_use]
    pub fn read_container(&self) -> Vec<u8> {
        fs::read(self.container_path()).expect("Failed to read container")
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
