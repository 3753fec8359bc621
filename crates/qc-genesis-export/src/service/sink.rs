//! # Output Sink
//!
//! Delivers genesis bytes to stdout or to a file.
//!
//! ## Encoding
//!
//! - stdout: compact JSON, one document
//! - file: indented JSON
//!
//! ## File Writes
//!
//! File output is atomic. Bytes go to a temporary file in the destination
//! directory, which is synced and then renamed over the target. A failed run
//! leaves any previous file at the path untouched.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::{ExportError, GenesisDocument};

/// Chunk size used when streaming a genesis file verbatim.
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Where the genesis document goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// A file path, replaced atomically.
    File(PathBuf),
}

impl OutputTarget {
    /// `None` or an empty path means stdout.
    pub fn from_flag(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => OutputTarget::File(path),
            _ => OutputTarget::Stdout,
        }
    }
}

/// Writes genesis output to its target.
///
/// The stdout writer is injectable so tests and embedders can capture it.
pub struct OutputSink<W: Write> {
    target: OutputTarget,
    stdout: W,
}

impl OutputSink<io::Stdout> {
    /// Sink writing to the process stdout when the target is stdout.
    pub fn new(target: OutputTarget) -> Self {
        Self::with_stdout(target, io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    /// Sink with a custom stdout writer.
    pub fn with_stdout(target: OutputTarget, stdout: W) -> Self {
        Self { target, stdout }
    }

    /// The configured target.
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Consume the sink, returning the stdout writer.
    pub fn into_stdout(self) -> W {
        self.stdout
    }

    /// Copy the file at `source` to the target unchanged. Returns the number
    /// of bytes copied.
    pub fn stream_file(&mut self, source: &Path) -> Result<u64, ExportError> {
        let mut file = File::open(source).map_err(|e| ExportError::genesis_read(source, e))?;
        self.stream_from(source, &mut file)
    }

    /// Copy `reader` to the target unchanged. Read failures are reported
    /// against `source`; write failures as `WriteFailed`.
    pub fn stream_from<R: Read>(&mut self, source: &Path, reader: &mut R) -> Result<u64, ExportError> {
        match &self.target {
            OutputTarget::Stdout => {
                let copied = copy_chunked(source, reader, &mut self.stdout)?;
                self.stdout.flush()?;
                Ok(copied)
            }
            OutputTarget::File(path) => {
                let mut copied = 0;
                write_atomic(path, |out| {
                    copied = copy_chunked(source, reader, out)?;
                    Ok(())
                })?;
                Ok(copied)
            }
        }
    }

    /// Encode `doc` to the target.
    pub fn write_document(&mut self, doc: &GenesisDocument) -> Result<(), ExportError> {
        match &self.target {
            OutputTarget::Stdout => {
                let mut out = BufWriter::with_capacity(COPY_BUFFER_SIZE, &mut self.stdout);
                serde_json::to_writer(&mut out, doc).map_err(ExportError::from_encode)?;
                out.write_all(b"\n")?;
                out.flush()?;
                Ok(())
            }
            OutputTarget::File(path) => write_atomic(path, |out| {
                let mut out = BufWriter::with_capacity(COPY_BUFFER_SIZE, out);
                serde_json::to_writer_pretty(&mut out, doc).map_err(ExportError::from_encode)?;
                out.write_all(b"\n")?;
                out.flush()?;
                Ok(())
            }),
        }
    }
}

/// Copy with a fixed buffer so no single write exceeds `COPY_BUFFER_SIZE`.
fn copy_chunked<R, W>(source: &Path, reader: &mut R, writer: &mut W) -> Result<u64, ExportError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExportError::genesis_read(source, e)),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
}

/// Run `fill` against a temp file next to `path`, then swap it into place.
///
/// The temp file is removed if `fill` or the rename fails.
fn write_atomic<F>(path: &Path, fill: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), ExportError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ExportError::WriteFailed(e.error))?;

    tracing::debug!(path = %path.display(), "genesis written");
    Ok(())
}
