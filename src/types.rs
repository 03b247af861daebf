/*!
 * Core types and data structures for LLM Globber
 */

use std::path::PathBuf;
use std::time::Duration;

/// One candidate file selected for inclusion in the output artifact.
///
/// Descriptors are produced by the collector in admission order and consumed
/// exactly once by the record writer. Paths are not deduplicated: admitting
/// the same path twice produces two records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Path as it was admitted (explicit argument, walked entry, or
    /// repository-relative path joined to the repository root)
    pub path: PathBuf,
    /// Size in bytes at admission time
    pub size: u64,
}

impl FileDescriptor {
    /// Create a new descriptor
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Counters for one serialization run, owned by the writer's driving loop
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Number of files whose records were written
    pub processed: usize,
    /// Number of files that failed to read or stat
    pub failed: usize,
    /// Wall time spent in the serialization loop
    pub elapsed: Duration,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Path of the produced artifact
    pub artifact: PathBuf,
    /// Serialization counters
    pub stats: ProcessingStats,
}
