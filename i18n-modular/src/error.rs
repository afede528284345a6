//! All error types for the i18n-modular crate.
//!
//! These are returned from all fallible operations (parsing, validation, the
//! sync operations, etc.).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("language key `{key}` in {} is invalid", path.display())]
    Validation { path: PathBuf, key: String },

    #[error("keys root {} does not exist", .0.display())]
    MissingSource(PathBuf),

    #[error("invalid dictionary pattern `{0}`")]
    InvalidPattern(String),

    #[error("`{0}` is not a module identifier")]
    InvalidIdentifier(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a parse error pointing at the offending file.
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Parse {
            path: path.into(),
            source,
        }
    }

    /// Creates a validation error naming the file and the bad language key.
    pub fn validation_error(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Error::Validation {
            path: path.into(),
            key: key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_parse_error_names_file() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::parse_error("/app/locales/en-US.json", json_error);
        let message = error.to_string();
        assert!(message.contains("parse error"));
        assert!(message.contains("en-US.json"));
    }

    #[test]
    fn test_validation_error_names_file_and_key() {
        let error = Error::validation_error("/app/button.translations.json", "english");
        assert_eq!(
            error.to_string(),
            "language key `english` in /app/button.translations.json is invalid"
        );
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_missing_source_error() {
        let error = Error::MissingSource(PathBuf::from("/nonexistent/src"));
        assert!(error.to_string().contains("/nonexistent/src"));
        assert!(error.to_string().contains("does not exist"));
    }

    #[test]
    fn test_invalid_identifier_error() {
        let error = Error::InvalidIdentifier("component:button".to_string());
        assert_eq!(
            error.to_string(),
            "`component:button` is not a module identifier"
        );
    }
}
