//! Error types and exit codes for diarist
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/journal error (no journal selected, invalid month or date)
//!
//! Conditions that are part of normal operation (absent index, unreadable
//! file during a rebuild, empty retrieval result) are typed outcomes, not
//! errors. Only failures the caller must act on end up here.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the diarist CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/journal error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during diarist operations
#[derive(Error, Debug)]
pub enum DiaristError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/journal errors (exit code 3)
    #[error("no journal selected (pass --root, set DIARIST_ROOT, or configure journal_path)")]
    NoJournalSelected,

    #[error("journal folder not found: {path:?}")]
    JournalNotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("Index build interrupted. Run `diarist index` to start over.")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl DiaristError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        DiaristError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        DiaristError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DiaristError::UnknownFormat(_) | DiaristError::UsageError(_) => ExitCode::Usage,

            DiaristError::NoJournalSelected
            | DiaristError::JournalNotFound { .. }
            | DiaristError::InvalidValue { .. } => ExitCode::Data,

            DiaristError::Io(_)
            | DiaristError::Json(_)
            | DiaristError::Toml(_)
            | DiaristError::FailedOperationWithTarget { .. }
            | DiaristError::Interrupted
            | DiaristError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            DiaristError::UnknownFormat(_) => "unknown_format",
            DiaristError::UsageError(_) => "usage_error",
            DiaristError::InvalidValue { .. } => "invalid_value",
            DiaristError::NoJournalSelected => "no_journal_selected",
            DiaristError::JournalNotFound { .. } => "journal_not_found",
            DiaristError::Io(_) => "io_error",
            DiaristError::Json(_) => "json_error",
            DiaristError::Toml(_) => "toml_error",
            DiaristError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            DiaristError::Interrupted => "interrupted",
            DiaristError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for diarist operations
pub type Result<T> = std::result::Result<T, DiaristError>;
