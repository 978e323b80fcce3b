//! Session configuration.

use uefappend_codec::ContainerVersion;

/// Tape timing and container settings.
///
/// Durations are in the units of the chunk they are written to: carrier
/// tones count cycles of the 2400 Hz tone, gaps count 1/2400 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Baud rate written to a new container.
    pub baud_rate: u16,

    /// Carrier tone before each record (4.5 s).
    pub lead_tone: u16,

    /// Carrier tone between a block header and its data (1 s).
    pub inter_block_tone: u16,

    /// Gap before every record except the first in a new container (0.5 s).
    pub record_gap: u16,

    /// Format version written to a new container.
    pub version: ContainerVersion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baud_rate: 300,
            lead_tone: 10800,
            inter_block_tone: 2400,
            record_gap: 1200,
            version: ContainerVersion::V0_10,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the baud rate written to new containers.
    #[must_use]
    pub const fn baud_rate(mut self, rate: u16) -> Self {
        self.baud_rate = rate;
        self
    }

    /// Sets the carrier tone before each record.
    #[must_use]
    pub const fn lead_tone(mut self, duration: u16) -> Self {
        self.lead_tone = duration;
        self
    }

    /// Sets the carrier tone between header and data.
    #[must_use]
    pub const fn inter_block_tone(mut self, duration: u16) -> Self {
        self.inter_block_tone = duration;
        self
    }

    /// Sets the gap between records.
    #[must_use]
    pub const fn record_gap(mut self, duration: u16) -> Self {
        self.record_gap = duration;
        self
    }

    /// Sets the format version written to new containers.
    #[must_use]
    pub const fn version(mut self, version: ContainerVersion) -> Self {
        self.version = version;
        self
    }
}
