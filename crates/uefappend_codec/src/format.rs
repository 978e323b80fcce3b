//! Fixed container layout constants.

/// The container signature: ASCII identifier plus NUL terminator.
pub const SIGNATURE: [u8; 10] = *b"UEF File!\0";

/// Size of a chunk's id + length prefix.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// UEF format version, stored after the signature as (minor, major).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerVersion {
    /// Major version.
    pub major: u8,
    /// Minor version.
    pub minor: u8,
}

impl ContainerVersion {
    /// Version 0.10, the revision written for new containers.
    pub const V0_10: Self = Self::new(0, 10);

    /// Creates a version from major and minor parts.
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Returns the on-disk byte order: minor first.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.minor, self.major]
    }
}

impl Default for ContainerVersion {
    fn default() -> Self {
        Self::V0_10
    }
}
