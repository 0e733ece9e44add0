// error.rs - Error types for the summarize step

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for summarize operations
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Error type for summarize operations
#[derive(Error, Debug)]
pub enum SummaryError {
    /// A required input directory does not exist
    #[error("{label} not found or not a directory: {}", path.display())]
    MissingDirectory {
        /// Which argument the directory came from
        label: String,
        /// The offending path
        path: PathBuf,
    },

    /// A required parameter was not supplied on the command line or in the config
    #[error("--{0} is required")]
    MissingParameter(&'static str),

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// I/O failure with the file involved
    #[error("{action} '{}': {source}", path.display())]
    Io {
        /// What was being attempted
        action: &'static str,
        /// File involved
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A classifier report that cannot be parsed
    #[error("Malformed {classifier} report '{}': {reason}", path.display())]
    MalformedReport {
        /// Which classifier produced the report
        classifier: &'static str,
        /// Path to the report
        path: PathBuf,
        /// Explanation of the problem
        reason: String,
    },

    /// TSV serialization failure
    #[error("Failed to write table '{}': {source}", path.display())]
    Table {
        /// Output file
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Configuration file problems
    #[error("Config error for '{}': {reason}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser or serializer message
        reason: String,
    },
}

impl SummaryError {
    /// Wrap an I/O error with the file it came from
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SummaryError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SummaryError::MissingDirectory { .. } => 2,
            _ => 1,
        }
    }
}
