//! Global error handling for llm_globber
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project, plus the mapping from error class to
//! process exit code.

use std::io;
use thiserror::Error;

use crate::git::GitError;

/// Global error type for llm_globber operations
#[derive(Error, Debug)]
pub enum GlobberError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Invalid or missing command-line configuration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No input file passed the configured filters
    #[error("No input files found matching criteria")]
    NoFilesMatched,

    /// Every admitted file failed to serialize
    #[error("No files were processed")]
    NothingProcessed,

    /// The run was cancelled by the user
    #[error("Operation cancelled")]
    Interrupted,
}

impl GlobberError {
    /// Map this error to its process exit code.
    ///
    /// Classes: 0 success, 1 runtime error, 2 argument error, 3 I/O error,
    /// 4 memory error, 130 user interruption. Allocation failure aborts in
    /// the Rust runtime before reaching this mapping, so class 4 is part of
    /// the exit contract but never produced here.
    pub fn exit_code(&self) -> i32 {
        match self {
            GlobberError::InvalidArgument(_) => 2,
            GlobberError::Io(_) => 3,
            GlobberError::Interrupted => 130,
            GlobberError::Git(_) | GlobberError::NoFilesMatched | GlobberError::NothingProcessed => {
                1
            }
        }
    }
}

/// Specialized Result type for llm_globber operations
pub type Result<T> = std::result::Result<T, GlobberError>;

/// Returns an `InvalidArgument` error with a formatted message
#[macro_export]
macro_rules! bail_arg {
    ($($arg:tt)*) => {
        return Err($crate::error::GlobberError::InvalidArgument(format!($($arg)*)))
    };
}

/// Ensures a condition holds, otherwise returns an `InvalidArgument` error
#[macro_export]
macro_rules! ensure_arg {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail_arg!($($arg)*)
        }
    };
}
