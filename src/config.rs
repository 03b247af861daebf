/*!
 * Configuration handling for LLM Globber
 */

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::ensure_arg;
use crate::error::Result;
use crate::extensions::ExtensionIndex;
use crate::utils::artifact_timestamp;

/// Default maximum admitted file size, in MB
pub const DEFAULT_MAX_SIZE_MB: u64 = 1024;

/// Default ceiling on consecutive blank lines after cleanup
pub const DEFAULT_MAX_BLANK_LINES: usize = 2;

/// Command-line arguments for LLM Globber
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "llm_globber",
    version = env!("CARGO_PKG_VERSION"),
    about = "Collect and format files into a single text artifact for LLM context",
    long_about = "Aggregates explicit files, recursively discovered directory contents, \
                  or a git repository's tracked files into one delimited text artifact \
                  suitable as context for Large Language Models."
)]
pub struct Args {
    /// Files or directories to process
    #[clap(value_name = "FILES/DIRECTORIES")]
    pub paths: Vec<String>,

    /// Output directory path
    #[clap(short = 'o', long = "output-dir", value_name = "PATH")]
    pub output_dir: String,

    /// Output file name (without extension)
    #[clap(short = 'n', long = "name", value_name = "NAME")]
    pub output_name: String,

    /// File types to include (comma separated, e.g. '.c,.h,.txt')
    #[clap(short = 't', long = "types", value_name = "TYPES")]
    pub file_types: Option<String>,

    /// Include all files (no filtering by type)
    #[clap(short = 'a', long = "all")]
    pub all_files: bool,

    /// Recursively process directories
    #[clap(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Filter files by name pattern (glob syntax, e.g. '*.c')
    #[clap(long = "pattern", value_name = "GLOB")]
    pub name_pattern: Option<String>,

    /// Include dot files (hidden files)
    #[clap(short = 'd', long = "dot-files")]
    pub dot_files: bool,

    /// Maximum file size in MB
    #[clap(short = 's', long = "max-size", value_name = "MB", default_value_t = DEFAULT_MAX_SIZE_MB)]
    pub max_size_mb: u64,

    /// Maximum consecutive blank lines left by the cleanup pass
    #[clap(long = "max-blank-lines", value_name = "N", default_value_t = DEFAULT_MAX_BLANK_LINES)]
    pub max_blank_lines: usize,

    /// Skip the blank-line cleanup pass entirely
    #[clap(long = "no-cleanup")]
    pub no_cleanup: bool,

    /// Process a git repository's tracked files instead of explicit paths
    #[clap(long = "repo", value_name = "PATH")]
    pub repo: Option<String>,

    /// Abort on errors (default is to continue)
    #[clap(short = 'e', long = "abort-on-error")]
    pub abort_on_error: bool,

    /// Quiet mode (suppress all output)
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[clap(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Application configuration, immutable once traversal starts
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the artifact is written into
    pub output_dir: PathBuf,

    /// Base name of the artifact (timestamp and extension are appended)
    pub output_name: String,

    /// Explicit files and directories to process
    pub inputs: Vec<PathBuf>,

    /// Allowed file-type suffixes
    pub extensions: ExtensionIndex,

    /// Whether the extension filter is active at all (`-a` disables it)
    pub filter_types: bool,

    /// Base-name glob pattern filter
    pub name_pattern: Option<String>,

    /// Whether dot files are admitted
    pub include_dot_files: bool,

    /// Whether directory arguments are traversed
    pub recursive: bool,

    /// Maximum admitted file size in bytes
    pub max_file_size: u64,

    /// Ceiling on consecutive blank lines after cleanup
    pub max_blank_lines: usize,

    /// Skip the cleanup pass
    pub skip_cleanup: bool,

    /// Repository root for repository mode
    pub repo: Option<PathBuf>,

    /// Treat per-file failures as fatal
    pub abort_on_error: bool,

    /// Suppress progress and logging
    pub quiet: bool,

    /// Enable debug logging
    pub verbose: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            output_dir: PathBuf::from(args.output_dir),
            output_name: args.output_name,
            inputs: args.paths.into_iter().map(PathBuf::from).collect(),
            extensions: args
                .file_types
                .as_deref()
                .map(ExtensionIndex::from_spec)
                .unwrap_or_default(),
            filter_types: !args.all_files,
            name_pattern: args.name_pattern,
            include_dot_files: args.dot_files,
            recursive: args.recursive,
            max_file_size: args.max_size_mb.saturating_mul(1024 * 1024),
            max_blank_lines: args.max_blank_lines,
            skip_cleanup: args.no_cleanup,
            repo: args.repo.map(PathBuf::from),
            abort_on_error: args.abort_on_error,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }

    /// Validate the configuration before any pipeline I/O
    pub fn validate(&self) -> Result<()> {
        ensure_arg!(
            !self.output_name.is_empty() && !self.output_name.contains('/'),
            "output name must be a plain file name, got '{}'",
            self.output_name
        );
        ensure_arg!(self.max_file_size > 0, "maximum file size must be positive");

        if let Some(repo) = &self.repo {
            ensure_arg!(
                repo.is_dir(),
                "repository path is not a directory: {}",
                repo.display()
            );
            if !self.inputs.is_empty() {
                warn!("explicit paths are ignored in repository mode");
            }
        } else {
            ensure_arg!(
                !self.inputs.is_empty(),
                "no input files or directories specified"
            );
        }

        Ok(())
    }

    /// File name of the artifact this run will produce
    pub fn artifact_file_name(&self) -> String {
        format!("{}_{}.txt", self.output_name, artifact_timestamp())
    }

    /// Full path of the artifact this run will produce
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(self.artifact_file_name())
    }
}
