/*!
 * Record serialization into the output artifact
 *
 * Each admitted file becomes one delimited record, committed in descriptor
 * order through a single buffered writer. Body sanitization is byte
 * oriented, not charset aware: multi-byte encodings come out as placeholder
 * runs. That is the documented contract, inherited from the tool's original
 * wire format.
 */

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use memmap2::Mmap;
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::classify::is_binary_data;
use crate::config::Config;
use crate::error::{GlobberError, Result};
use crate::types::{FileDescriptor, ProcessingStats};
use crate::utils::{set_restrictive_permissions, ARTIFACT_MODE, OUTPUT_DIR_MODE};

/// Files at or above this size are read through a memory map
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Capacity of the artifact's buffered writer
const IO_BUFFER_SIZE: usize = 1 << 18;

/// Fixed first line of every artifact
pub const BANNER: &str = "*Local Files*";

/// Body line written in place of binary file contents
pub const BINARY_OMISSION_MARKER: &str = "[Binary file - contents omitted]";

/// Replacement written for every byte outside the passthrough set
const PLACEHOLDER: &[u8] = "\u{FFFD}".as_bytes();

/// Serializes admitted files into the output artifact
pub struct RecordWriter {
    out: BufWriter<File>,
    path: PathBuf,
    abort_on_error: bool,
    stats: ProcessingStats,
    progress: Arc<ProgressBar>,
}

impl RecordWriter {
    /// Create the artifact and write the banner line.
    ///
    /// The output directory is created with mode 0o700 if absent; the
    /// artifact itself gets mode 0o600. A creation failure aborts the whole
    /// run.
    pub fn create(config: &Config, progress: Arc<ProgressBar>) -> Result<Self> {
        if !config.output_dir.exists() {
            fs::create_dir_all(&config.output_dir)?;
            set_restrictive_permissions(&config.output_dir, OUTPUT_DIR_MODE)?;
            info!("created output directory: {}", config.output_dir.display());
        }

        let path = config.artifact_path();
        let file = File::create(&path)?;
        set_restrictive_permissions(&path, ARTIFACT_MODE)?;

        let mut out = BufWriter::with_capacity(IO_BUFFER_SIZE, file);
        writeln!(out, "{}", BANNER)?;

        Ok(Self {
            out,
            path,
            abort_on_error: config.abort_on_error,
            stats: ProcessingStats::default(),
            progress,
        })
    }

    /// Path of the artifact being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize every descriptor in list order.
    ///
    /// This loop owns the processed/failed counters. A per-file failure is
    /// logged and counted, and the loop continues unless abort-on-error is
    /// set. The cancellation token is polled between files only.
    pub fn write_all(
        &mut self,
        files: &[FileDescriptor],
        cancel: &CancellationToken,
    ) -> Result<()> {
        let started = Instant::now();

        for descriptor in files {
            if cancel.is_cancelled() {
                self.stats.elapsed = started.elapsed();
                return Err(GlobberError::Interrupted);
            }

            self.progress
                .set_message(format!("Current file: {}", display_name(&descriptor.path)));

            match self.write_record(descriptor) {
                Ok(()) => self.stats.processed += 1,
                Err(err) => {
                    self.stats.failed += 1;
                    warn!("failed to process {}: {}", descriptor.path.display(), err);
                    if self.abort_on_error {
                        self.stats.elapsed = started.elapsed();
                        return Err(err.into());
                    }
                }
            }

            self.progress.inc(1);
        }

        self.stats.elapsed = started.elapsed();
        Ok(())
    }

    /// Flush the artifact and hand back the counters
    pub fn finish(mut self) -> Result<ProcessingStats> {
        self.out.flush()?;
        Ok(self.stats)
    }

    /// Serialize one file. Reads of 1 MiB and larger go through a memory
    /// map; both read paths produce byte-identical records for identical
    /// content.
    fn write_record(&mut self, descriptor: &FileDescriptor) -> io::Result<()> {
        debug!(
            "processing file {}: size {} bytes",
            descriptor.path.display(),
            descriptor.size
        );

        if descriptor.size >= MMAP_THRESHOLD {
            let mapped = read_mapped(&descriptor.path)?;
            emit_record(&mut self.out, &descriptor.path, &mapped)
        } else {
            let data = read_buffered(&descriptor.path)?;
            emit_record(&mut self.out, &descriptor.path, &data)
        }
    }
}

/// Render one complete record: start marker, sanitized body or omission
/// marker, end marker, separator line.
pub(crate) fn emit_record<W: Write>(out: &mut W, path: &Path, data: &[u8]) -> io::Result<()> {
    writeln!(out, "'''--- {} ---", path.display())?;
    if is_binary_data(data) {
        writeln!(out, "{}", BINARY_OMISSION_MARKER)?;
    } else {
        sanitize_to(out, data)?;
        writeln!(out)?;
    }
    writeln!(out, "'''")?;
    writeln!(out)?;
    Ok(())
}

/// Copy bytes to the writer, substituting the placeholder for everything
/// outside printable ASCII and `\n`/`\r`/`\t`
pub(crate) fn sanitize_to<W: Write>(out: &mut W, data: &[u8]) -> io::Result<()> {
    let mut buffer = Vec::with_capacity(8192 * PLACEHOLDER.len());
    for chunk in data.chunks(8192) {
        buffer.clear();
        for &byte in chunk {
            match byte {
                0x20..=0x7E | b'\n' | b'\r' | b'\t' => buffer.push(byte),
                _ => buffer.extend_from_slice(PLACEHOLDER),
            }
        }
        out.write_all(&buffer)?;
    }
    Ok(())
}

/// Whole-file read through a buffered reader
pub(crate) fn read_buffered(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Whole-file read through a memory map
pub(crate) fn read_mapped(path: &Path) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: the mapping is read-only and dropped before the record loop
    // moves to the next file; concurrent truncation by another process is
    // outside the supported contract.
    unsafe { Mmap::map(&file) }
}

/// Shorten long file names for the progress line
fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    if name.len() > 40 {
        let cut = name.len() - 37;
        match name.get(cut..) {
            Some(tail) => format!("...{}", tail),
            None => name,
        }
    } else {
        name
    }
}
