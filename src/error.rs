//! Error types for loading record files and driving a dashboard session.
//!
//! Aggregation and delta computation are total and never produce errors;
//! everything here concerns acquiring input and writing exports.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    /// Reading or writing a file failed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("Error processing JSON file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid CSV, or a CSV export failed
    #[error("Error processing CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Valid JSON, but not an array of record objects
    #[error("Malformed input in {}: {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    /// Extension is neither `.json` nor `.csv`
    #[error("Unsupported file format: {} (expected .json or .csv)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// One of the two period files was not supplied
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A dashboard was requested before any data was loaded
    #[error("No data loaded. Load the prior and current files first.")]
    NoData,
}

impl DashboardError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: message.into(),
        }
    }
}
