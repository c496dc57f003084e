//! Error types for dispatchboard.
//!
//! These cover loading and plumbing: configuration, the source dataset and
//! navigation. Driver assignment never produces an [`Error`]; a rejected
//! assignment is an ordinary [`crate::AssignmentOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dispatchboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Dataset Errors ===
    /// The dataset file could not be read.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset parsed but breaks a shipment/driver invariant.
    #[error("invalid dataset: {message}")]
    DatasetInvalid {
        /// Description of the violated invariant.
        message: String,
    },

    // === Navigation Errors ===
    /// No route matches the requested path.
    #[error("no route matches '{path}'")]
    UnknownRoute {
        /// The path that failed to resolve.
        path: String,
    },

    // === I/O Errors ===
    /// Terminal or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for dispatchboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a dataset invariant error.
    #[must_use]
    pub fn dataset_invalid(message: impl Into<String>) -> Self {
        Self::DatasetInvalid {
            message: message.into(),
        }
    }

    /// Create an unknown route error.
    #[must_use]
    pub fn unknown_route(path: impl Into<String>) -> Self {
        Self::UnknownRoute { path: path.into() }
    }

    /// Check if this error came from loading or validating the dataset.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetRead { .. } | Self::DatasetInvalid { .. } | Self::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_invalid_display() {
        let err = Error::dataset_invalid("duplicate shipment id 'S1'");
        assert_eq!(
            err.to_string(),
            "invalid dataset: duplicate shipment id 'S1'"
        );
    }

    #[test]
    fn test_unknown_route_display() {
        let err = Error::unknown_route("/drivers/D1");
        assert_eq!(err.to_string(), "no route matches '/drivers/D1'");
    }

    #[test]
    fn test_dataset_read_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::DatasetRead {
            path: PathBuf::from("/data/shipments.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/shipments.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::ConfigValidation {
            message: "dataset path must be a .json file".to_string(),
        };
        assert!(err.to_string().contains(".json"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_is_dataset_error() {
        assert!(Error::dataset_invalid("x").is_dataset_error());
        assert!(!Error::unknown_route("/x").is_dataset_error());
        assert!(!Error::ConfigValidation {
            message: "x".to_string()
        }
        .is_dataset_error());
    }
}
