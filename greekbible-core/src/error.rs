//! Error types for the merge pipeline.
//!
//! Every failure mode is fatal to the run: the caller is expected to print
//! the diagnostic and exit non-zero. The source LXX module is never opened
//! read-write, so no failure can corrupt the inputs.

use std::path::Path;
use thiserror::Error;

/// Main error type for merge operations.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A required input file is missing.
    #[error("Missing input: {path} ({context})")]
    MissingInput {
        /// Path that was checked.
        path: String,
        /// What the file was expected to be.
        context: String,
    },

    /// No SBLGNT database candidate was found in the repository directory.
    #[error("No SBLGNT SQLite database found under {search_dir}")]
    NoDatabaseFound {
        /// Directory that was searched recursively.
        search_dir: String,
    },

    /// A database operation failed.
    #[error("Database operation failed: {context}")]
    Database {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// Configuration or validation error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed.
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization of the merge report failed.
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with `MergeError`.
pub type Result<T> = std::result::Result<T, MergeError>;

impl MergeError {
    /// Creates a missing-input error for a path.
    pub fn missing_input(path: &Path, context: impl Into<String>) -> Self {
        Self::MissingInput {
            path: path.display().to_string(),
            context: context.into(),
        }
    }

    /// Creates a database error with context.
    pub fn database(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            context: context.into(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context.
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_input_display() {
        let error = MergeError::missing_input(
            &PathBuf::from("LXX1.SQLite3"),
            "base LXX module",
        );
        let message = error.to_string();
        assert!(message.contains("LXX1.SQLite3"));
        assert!(message.contains("base LXX module"));
    }

    #[test]
    fn test_no_database_found_display() {
        let error = MergeError::NoDatabaseFound {
            search_dir: "SBLGNT-add-ons".to_string(),
        };
        assert!(error.to_string().contains("SBLGNT-add-ons"));
    }

    #[test]
    fn test_configuration_display() {
        let error = MergeError::configuration("output path is a directory");
        assert!(error.to_string().contains("output path is a directory"));
    }
}
