//! Container lifecycle: validate or create, then append.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::transcoder::{BlockTranscoder, TranscodeSummary};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::{info, warn};
use uefappend_codec::{ByteWriter, ChunkEncoder, SIGNATURE};
use uefappend_storage::{FileBackend, StorageBackend};

/// Result of appending one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Every record of the input was written.
    Appended(TranscodeSummary),
    /// The input ended inside a record; the records before it were written.
    Truncated {
        /// What was written before the bad record.
        summary: TranscodeSummary,
        /// Why the input stopped.
        reason: String,
    },
    /// The input could not be opened or read; nothing was written.
    Skipped {
        /// Why the input was skipped.
        reason: String,
    },
}

impl AppendOutcome {
    /// Returns what was written for this input.
    #[must_use]
    pub fn summary(&self) -> TranscodeSummary {
        match self {
            Self::Appended(summary) | Self::Truncated { summary, .. } => *summary,
            Self::Skipped { .. } => TranscodeSummary::default(),
        }
    }
}

/// An open UEF container that records are appended to.
///
/// The session is the only writer of the container for its lifetime.
/// Bytes that were in the container when it was opened are never
/// touched; everything is appended.
///
/// # Example
///
/// ```no_run
/// use uefappend_core::{Config, ContainerSession};
/// use std::path::Path;
///
/// let mut session = ContainerSession::open(Path::new("games.uef"), Config::default()).unwrap();
/// session.ensure_header().unwrap();
/// session.append_file(Path::new("invaders.atm")).unwrap();
/// session.finish().unwrap();
/// ```
pub struct ContainerSession<B: StorageBackend> {
    encoder: ChunkEncoder<B>,
    config: Config,
    created: bool,
    needs_header: bool,
    first_record: bool,
}

impl ContainerSession<FileBackend> {
    /// Opens the container at `path`, or prepares to create it.
    ///
    /// An existing non-empty file must start with the UEF signature;
    /// this is checked before the file is opened for writing.
    ///
    /// # Errors
    ///
    /// - [`CoreError::WrongFileType`] if the file exists and is not a UEF
    /// - [`CoreError::CannotWrite`] if the file cannot be opened for appending
    pub fn open(path: &Path, config: Config) -> CoreResult<Self> {
        let is_new = match File::open(path) {
            Ok(file) => {
                let mut prefix = Vec::with_capacity(SIGNATURE.len());
                file.take(SIGNATURE.len() as u64).read_to_end(&mut prefix)?;
                if !prefix.is_empty() {
                    verify_signature(&prefix)?;
                }
                prefix.is_empty()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };

        let backend = FileBackend::open(path).map_err(|source| CoreError::CannotWrite {
            path: path.to_path_buf(),
            source,
        })?;

        if is_new {
            info!(path = %path.display(), "creating new container");
        }
        Ok(Self::from_parts(backend, config, is_new))
    }
}

impl<B: StorageBackend> ContainerSession<B> {
    /// Opens a container held in an arbitrary backend.
    ///
    /// An empty backend is a new container.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::WrongFileType`] if the backend holds data that
    /// does not start with the UEF signature.
    pub fn with_backend(backend: B, config: Config) -> CoreResult<Self> {
        let size = backend.size()?;
        let is_new = size == 0;
        if !is_new {
            let len = size.min(SIGNATURE.len() as u64) as usize;
            verify_signature(&backend.read_at(0, len)?)?;
        }
        Ok(Self::from_parts(backend, config, is_new))
    }

    fn from_parts(backend: B, config: Config, is_new: bool) -> Self {
        Self {
            encoder: ChunkEncoder::new(ByteWriter::new(backend)),
            config,
            created: is_new,
            needs_header: is_new,
            first_record: is_new,
        }
    }

    /// Writes the signature, version and initial baud rate to a new
    /// container. Does nothing for an existing one, or the second time.
    pub fn ensure_header(&mut self) -> CoreResult<()> {
        if !self.needs_header {
            return Ok(());
        }

        let writer = self.encoder.writer_mut();
        writer.write_bytes(&SIGNATURE)?;
        writer.write_bytes(&self.config.version.to_bytes())?;
        self.encoder.write_baud_rate(self.config.baud_rate)?;

        self.needs_header = false;
        Ok(())
    }

    /// Returns true while the container was created by this session and
    /// no record has been written to it yet.
    #[must_use]
    pub const fn is_first_record(&self) -> bool {
        self.first_record
    }

    /// Returns true if this session created the container.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.created
    }

    pub(crate) fn mark_record_written(&mut self) {
        self.first_record = false;
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn encoder_mut(&mut self) -> &mut ChunkEncoder<B> {
        &mut self.encoder
    }

    /// Appends every record of the ATM or TAP file at `path`.
    ///
    /// An input that cannot be opened or read is skipped with a warning,
    /// and an input that ends inside a record keeps the records before it.
    /// Either way the container stays consistent and the run can go on.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be written.
    pub fn append_file(&mut self, path: &Path) -> CoreResult<AppendOutcome> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!(input = %path.display(), error = %err, "could not open input; skipping");
                return Ok(AppendOutcome::Skipped {
                    reason: err.to_string(),
                });
            }
        };

        let mut transcoder = BlockTranscoder::new(self);
        match transcoder.transcode(BufReader::new(file)) {
            Ok(summary) => Ok(AppendOutcome::Appended(summary)),
            Err(err) if err.is_input_error() => {
                let summary = transcoder.summary();
                if summary.records == 0 && matches!(err, CoreError::InputRead(_)) {
                    warn!(input = %path.display(), error = %err, "could not read input; skipping");
                    return Ok(AppendOutcome::Skipped {
                        reason: err.to_string(),
                    });
                }
                warn!(input = %path.display(), error = %err, "input ended early");
                Ok(AppendOutcome::Truncated {
                    summary,
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Appends every record read from `input`.
    ///
    /// # Errors
    ///
    /// Returns the first error from reading or writing.
    pub fn append_reader<R: Read>(&mut self, input: R) -> CoreResult<TranscodeSummary> {
        BlockTranscoder::new(self).transcode(input)
    }

    /// Writes the header if still needed, syncs the container to durable
    /// storage, and returns the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the final writes or the sync fail.
    pub fn finish(mut self) -> CoreResult<B> {
        self.ensure_header()?;
        let mut writer = self.encoder.into_inner();
        writer.sync()?;
        Ok(writer.into_inner())
    }
}

fn verify_signature(prefix: &[u8]) -> CoreResult<()> {
    if prefix == SIGNATURE {
        Ok(())
    } else {
        Err(CoreError::WrongFileType)
    }
}
