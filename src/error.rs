// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Failures that decide the process exit code.
///
/// Library code returns `anyhow::Result` and wraps these with context; `main`
/// walks the chain to find the variant and exits with [`FilterError::exit_code`].
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{message}\n{usage}")]
    Usage { message: String, usage: String },

    #[error("match policy configuration: {0}")]
    Config(String),

    #[error(
        "no column matching any of [{}] found; available columns: [{}]",
        .candidates.join(", "),
        .available.join(", ")
    )]
    ColumnNotFound {
        candidates: Vec<String>,
        available: Vec<String>,
    },

    #[error("{path}: line {line} has {found} fields but the header has {expected}")]
    Malformed {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{path}: no header row")]
    NoHeader { path: PathBuf },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilterError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FilterError::Usage { .. } => 1,
            FilterError::Config(_) => 2,
            FilterError::ColumnNotFound { .. } => 3,
            FilterError::Malformed { .. } | FilterError::NoHeader { .. } | FilterError::Io { .. } => 1,
        }
    }
}

/// Exit code for an arbitrary error chain; anything untyped is a plain failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<FilterError>())
        .map(FilterError::exit_code)
        .unwrap_or(1)
}
