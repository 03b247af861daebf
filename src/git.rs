/*!
 * Repository-mode input source
 *
 * A narrow collaborator around the external `git` binary. Only four
 * questions are asked of it: is this a working tree, what is the repository
 * called, what branch is checked out, and which files are tracked.
 * Repository internals are never touched directly.
 */

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Branch name reported when the checked-out branch cannot be determined
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Errors from invoking the external `git` binary
#[derive(Error, Debug)]
pub enum GitError {
    /// The `git` binary could not be spawned
    #[error("failed to run git: {0}")]
    Spawn(#[from] io::Error),

    /// `git` ran but reported failure
    #[error("git {command} failed: {stderr}")]
    Command {
        /// Subcommand that failed
        command: String,
        /// Trimmed stderr of the failed invocation
        stderr: String,
    },

    /// `git` produced output that is not valid UTF-8
    #[error("git {command} produced non-UTF-8 output")]
    NonUtf8Output {
        /// Subcommand whose output could not be decoded
        command: String,
    },

    /// The configured path is not inside a git working tree
    #[error("not a git working tree: {0}")]
    NotAWorkingTree(String),
}

/// Result alias for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Handle on one repository working tree
#[derive(Debug, Clone)]
pub struct GitSource {
    root: PathBuf,
}

impl GitSource {
    /// Create a source rooted at the given working-tree path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Working-tree root this source reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the root lies inside a git working tree
    pub fn is_working_tree(&self) -> bool {
        self.git(&["rev-parse", "--is-inside-work-tree"])
            .map(|out| out.trim() == "true")
            .unwrap_or(false)
    }

    /// Repository name, derived from the `origin` remote URL with the
    /// directory basename as fallback
    pub fn repository_name(&self) -> String {
        if let Ok(url) = self.git(&["remote", "get-url", "origin"]) {
            if let Some(name) = repo_name_from_url(url.trim()) {
                return name;
            }
        }
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Currently checked-out branch, or [`UNKNOWN_BRANCH`] when git cannot
    /// tell (fresh repository, corrupt HEAD)
    pub fn current_branch(&self) -> String {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .ok()
            .map(|out| out.trim().to_string())
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| UNKNOWN_BRANCH.to_string())
    }

    /// Tracked files as repository-relative paths, in the order git reports
    /// them
    pub fn tracked_files(&self) -> GitResult<Vec<PathBuf>> {
        let output = self.git(&["ls-files"])?;
        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Run one git subcommand in the source root and return its stdout
    fn git(&self, args: &[&str]) -> GitResult<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        let command = args.join(" ");
        if !output.status.success() {
            return Err(GitError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::NonUtf8Output { command })
    }
}

/// Extract a repository name from a remote URL.
///
/// Handles HTTPS (`https://host/owner/repo.git`) and SCP-style SSH
/// (`git@host:owner/repo.git`) forms; a trailing `.git` or `/` is stripped.
fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    let name = trimmed.rsplit(['/', ':']).next()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
