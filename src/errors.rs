// src/errors.rs

//! Crate-wide error types.
//!
//! Each helper has its own error enum so callers can match on exactly what
//! went wrong; [`XjfxError`] wraps all of them for code (like the binary)
//! that just wants one type.

use std::io;

use thiserror::Error;

use crate::exec::ProcData;

/// Failures of [`crate::exec::exec_cmd`] and [`crate::exec::exec_cmd_async`].
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("empty command: the argument vector must contain at least the program")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited non-zero and `ignore_retcode` was not set.
    ///
    /// `output` holds everything captured before the process exited.
    #[error("`{command}` returned non-zero exit status {retcode}")]
    NonZeroExit {
        command: String,
        retcode: i32,
        output: ProcData,
    },

    #[error("I/O error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl ExecError {
    /// Exit code carried by a [`ExecError::NonZeroExit`], if any.
    pub fn retcode(&self) -> Option<i32> {
        match self {
            ExecError::NonZeroExit { retcode, .. } => Some(*retcode),
            _ => None,
        }
    }
}

/// Failures of the batch runner in [`crate::pool`].
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("invalid worker count: {0} (must be >= 0)")]
    InvalidWorkerCount(i64),

    #[error("failed to build worker pool: {0}")]
    Build(#[from] rayon::ThreadPoolBuildError),

    #[error("task {index} panicked: {message}")]
    TaskPanicked { index: usize, message: String },
}

/// Failures of [`crate::grouper::grouper`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrouperError {
    #[error("block size must be >= 1")]
    ZeroSize,

    #[error("incomplete last block: expected {expected} elements, got {got}")]
    Incomplete { expected: usize, got: usize },
}

#[derive(Error, Debug)]
pub enum XjfxError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Grouper(#[from] GrouperError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, XjfxError>;
