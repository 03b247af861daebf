/*!
 * LLM Globber - Collect and format files into one text artifact for LLM
 * context
 *
 * This library aggregates explicit files, recursively discovered directory
 * contents, or a git repository's tracked files into a single delimited
 * text artifact, with binary detection, byte sanitization and a blank-line
 * normalization pass.
 */

use std::fs;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::error;

pub mod cancel;
pub mod classify;
pub mod cleanup;
pub mod collector;
pub mod config;
pub mod error;
pub mod extensions;
pub mod git;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use cancel::CancellationToken;
pub use collector::PathCollector;
pub use config::{Args, Config};
pub use error::{GlobberError, Result};
pub use extensions::ExtensionIndex;
pub use git::GitSource;
pub use report::{ReportFormat, Reporter};
pub use types::{FileDescriptor, ProcessingStats, RunSummary};
pub use writer::RecordWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the full pipeline: collect, serialize, normalize.
///
/// The stages run strictly in sequence with a single logical writer. On any
/// failure or cancellation before the artifact is complete, the partial
/// artifact is removed, so the artifact on disk is always either absent,
/// fully written, or fully written and normalized. Cancellation surfaces as
/// [`GlobberError::Interrupted`], distinct from success and failure.
pub fn run(
    config: &Config,
    cancel: &CancellationToken,
    progress: Arc<ProgressBar>,
) -> Result<RunSummary> {
    let collector = PathCollector::new(config, cancel);
    let files = collector.collect()?;
    if files.is_empty() {
        return Err(GlobberError::NoFilesMatched);
    }
    progress.set_length(files.len() as u64);

    let mut writer = RecordWriter::create(config, Arc::clone(&progress))?;
    let artifact = writer.path().to_path_buf();

    if let Err(err) = writer.write_all(&files, cancel) {
        drop(writer);
        let _ = fs::remove_file(&artifact);
        return Err(err);
    }

    let stats = match writer.finish() {
        Ok(stats) => stats,
        Err(err) => {
            let _ = fs::remove_file(&artifact);
            return Err(err);
        }
    };

    if stats.processed == 0 {
        let _ = fs::remove_file(&artifact);
        return Err(GlobberError::NothingProcessed);
    }

    if !config.skip_cleanup {
        match cleanup::collapse_blank_lines(&artifact, config.max_blank_lines, cancel) {
            Ok(()) => {}
            // The artifact is complete at this point; cleanup leaves it
            // untouched on interruption, but the run still reports the
            // interrupted outcome.
            Err(GlobberError::Interrupted) => return Err(GlobberError::Interrupted),
            Err(err) => error!("cleanup of {} failed: {}", artifact.display(), err),
        }
    }

    Ok(RunSummary { artifact, stats })
}
