//! ATM record to UEF chunk transcoding.

use crate::block::BlockHeader;
use crate::error::CoreResult;
use crate::record::{FileRecord, RecordReader};
use crate::session::ContainerSession;
use std::io::Read;
use tracing::debug;
use uefappend_codec::ChecksumBuffer;
use uefappend_storage::StorageBackend;

/// Counts of what a transcoding run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeSummary {
    /// Records written.
    pub records: usize,
    /// Tape blocks written.
    pub blocks: usize,
    /// Payload bytes written, excluding headers and checksums.
    pub bytes: u64,
}

impl TranscodeSummary {
    /// Adds another summary's counts to this one.
    pub fn merge(&mut self, other: Self) {
        self.records += other.records;
        self.blocks += other.blocks;
        self.bytes += other.bytes;
    }
}

/// Writes ATM records to a container as tape blocks.
///
/// Per record the chunk sequence is:
///
/// ```text
/// [gap]  tone(lead)  { data(header)  tone(inter-block)  data(payload + checksum) }*
/// ```
///
/// The gap is omitted for the very first record of a freshly created
/// container.
pub struct BlockTranscoder<'a, B: StorageBackend> {
    session: &'a mut ContainerSession<B>,
    summary: TranscodeSummary,
}

impl<'a, B: StorageBackend> BlockTranscoder<'a, B> {
    /// Creates a transcoder appending through `session`.
    pub fn new(session: &'a mut ContainerSession<B>) -> Self {
        Self {
            session,
            summary: TranscodeSummary::default(),
        }
    }

    /// Transcodes every record in `input` until it is exhausted.
    ///
    /// # Errors
    ///
    /// Stops at the first failing record. Records written before it stay
    /// in the container and are counted in [`Self::summary`].
    pub fn transcode<R: Read>(&mut self, input: R) -> CoreResult<TranscodeSummary> {
        let mut reader = RecordReader::new(input);
        while let Some(record) = reader.next_record()? {
            self.write_record(&record)?;
        }
        Ok(self.summary)
    }

    /// Writes one record as its full tape sequence.
    pub fn write_record(&mut self, record: &FileRecord) -> CoreResult<()> {
        self.session.ensure_header()?;
        let config = *self.session.config();
        let leading_gap = !self.session.is_first_record();

        let encoder = self.session.encoder_mut();
        if leading_gap {
            encoder.write_gap(config.record_gap)?;
        }
        encoder.write_carrier_tone(config.lead_tone)?;

        let mut blocks = 0;
        for block in record.sub_blocks() {
            let header = BlockHeader::new(record, &block).encode();
            encoder.write_data(header.as_bytes())?;
            encoder.write_carrier_tone(config.inter_block_tone)?;

            let mut payload = ChecksumBuffer::continuing(header.checksum());
            payload.write_bytes(block.data);
            encoder.write_data(&payload.into_bytes_with_checksum())?;
            blocks += 1;
        }
        self.session.mark_record_written();

        debug!(
            name = %record.display_name(),
            load = record.load_address(),
            exec = record.execute_address(),
            len = record.len(),
            blocks,
            "record written"
        );

        self.summary.records += 1;
        self.summary.blocks += blocks;
        self.summary.bytes += record.len() as u64;
        Ok(())
    }

    /// Returns what has been written so far.
    #[must_use]
    pub const fn summary(&self) -> TranscodeSummary {
        self.summary
    }
}
