/*!
 * File discovery and admission
 *
 * Turns explicit paths, directory trees, or a repository's tracked files
 * into the ordered list of descriptors the writer consumes. Ordering is
 * load-bearing: explicit arguments keep their argument order, walked
 * entries arrive in filesystem-reported order (unsorted, so traversal order
 * can differ across platforms), and tracked files keep git's order.
 */

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::error::{GlobberError, Result};
use crate::git::{GitError, GitSource};
use crate::types::FileDescriptor;
use crate::utils::format_file_size;

/// Collects and filters candidate files for one run
pub struct PathCollector<'a> {
    config: &'a Config,
    cancel: &'a CancellationToken,
}

impl<'a> PathCollector<'a> {
    /// Create a collector over the given configuration
    pub fn new(config: &'a Config, cancel: &'a CancellationToken) -> Self {
        Self { config, cancel }
    }

    /// Produce the complete, order-preserving admitted list.
    ///
    /// In repository mode every tracked file becomes an explicit root with
    /// recursion forced on; otherwise the configured inputs are visited in
    /// the order given. Unreadable paths are warned about and skipped,
    /// never fatal.
    pub fn collect(&self) -> Result<Vec<FileDescriptor>> {
        let mut admitted = Vec::new();

        if let Some(repo) = &self.config.repo {
            let source = GitSource::new(repo);
            if !source.is_working_tree() {
                return Err(GlobberError::Git(GitError::NotAWorkingTree(
                    repo.display().to_string(),
                )));
            }
            info!(
                "collecting tracked files from repository '{}' (branch {})",
                source.repository_name(),
                source.current_branch()
            );
            for relative in source.tracked_files()? {
                if self.cancel.is_cancelled() {
                    return Err(GlobberError::Interrupted);
                }
                self.visit_root(&repo.join(relative), true, &mut admitted)?;
            }
        } else {
            for input in &self.config.inputs {
                if self.cancel.is_cancelled() {
                    return Err(GlobberError::Interrupted);
                }
                self.visit_root(input, self.config.recursive, &mut admitted)?;
            }
        }

        Ok(admitted)
    }

    /// Visit one root: admit a file directly, traverse a directory when
    /// recursion applies
    fn visit_root(&self, path: &Path, recursive: bool, out: &mut Vec<FileDescriptor>) -> Result<()> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("could not access path {}: {}", path.display(), err);
                return Ok(());
            }
        };

        if metadata.is_dir() {
            if recursive {
                self.walk_directory(path, out)?;
            } else {
                warn!(
                    "{} is a directory. Use -r to process recursively.",
                    path.display()
                );
            }
        } else if metadata.is_file() {
            if self.admit(path, metadata.len()) {
                out.push(FileDescriptor::new(path, metadata.len()));
            }
        }

        Ok(())
    }

    /// Depth-first traversal in filesystem entry order. Dot-file pruning
    /// happens at `filter_entry`, so an excluded dot-directory's
    /// descendants are never yielded.
    fn walk_directory(&self, dir: &Path, out: &mut Vec<FileDescriptor>) -> Result<()> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        for entry in walker {
            if self.cancel.is_cancelled() {
                return Err(GlobberError::Interrupted);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("error reading directory entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    warn!("could not stat {}: {}", entry.path().display(), err);
                    continue;
                }
            };

            if self.admit(entry.path(), size) {
                out.push(FileDescriptor::new(entry.path(), size));
            }
        }

        Ok(())
    }

    /// Entry-level pruning predicate applied to files and directories alike
    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if self.config.include_dot_files {
            return true;
        }
        !entry
            .file_name()
            .to_string_lossy()
            .starts_with('.')
    }

    /// Apply the admission filters to a candidate file
    fn admit(&self, path: &Path, size: u64) -> bool {
        let base_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        if !self.config.include_dot_files && base_name.starts_with('.') {
            debug!("skipping dot file: {}", path.display());
            return false;
        }

        if size > self.config.max_file_size {
            warn!(
                "skipping file {}: size exceeds limit ({} > {})",
                path.display(),
                format_file_size(size),
                format_file_size(self.config.max_file_size)
            );
            return false;
        }

        if let Some(pattern) = &self.config.name_pattern {
            if !glob_match::glob_match(pattern, &base_name) {
                debug!("skipping file {}: does not match pattern", path.display());
                return false;
            }
        }

        if self.config.filter_types
            && !self.config.extensions.is_empty()
            && !self.config.extensions.contains_path(path)
        {
            debug!(
                "skipping file {}: does not match selected types",
                path.display()
            );
            return false;
        }

        true
    }
}
