//! Error handling for the rres binding generator
//!
//! Only setup failures are errors. Extraction misses are soft and end up in
//! the [`GenerationReport`](crate::report::GenerationReport) instead.

use thiserror::Error;
use std::path::PathBuf;

/// Main error type for binding generation
#[derive(Error, Debug)]
pub enum BindgenError {
    /// The primary header could not be located
    #[error("Header not found: {}", path.display())]
    HeaderNotFound {
        path: PathBuf,
        searched: Vec<PathBuf>,
    },

    /// The primary header exists but could not be read
    #[error("Failed to read header {}: {source}", path.display())]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// Generated text could not be written
    #[error("Failed to write output {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode refused a run that skipped items
    #[error("Strict mode: {skipped} item(s) were skipped during extraction")]
    StrictMode {
        skipped: usize,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Generic(#[from] anyhow::Error),
}

impl BindgenError {
    /// Create a header-not-found error for a single attempted path
    pub fn header_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::HeaderNotFound {
            path: path.into(),
            searched: Vec::new(),
        }
    }

    /// Create a header-not-found error listing every location that was tried
    pub fn header_not_found_in<P: Into<PathBuf>>(path: P, searched: Vec<PathBuf>) -> Self {
        Self::HeaderNotFound {
            path: path.into(),
            searched,
        }
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error tied to a config file
    pub fn configuration_in<S: Into<String>, P: Into<PathBuf>>(message: S, path: P) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::HeaderNotFound { .. } | Self::HeaderRead { .. } => 2,
            Self::Configuration { .. } => 3,
            Self::StrictMode { .. } => 4,
            _ => 1,
        }
    }
}

/// Result type for binding generation
pub type BindgenResult<T> = Result<T, BindgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_not_found_message_names_path() {
        let err = BindgenError::header_not_found("/tmp/cache/src/rres.h");
        assert_eq!(err.to_string(), "Header not found: /tmp/cache/src/rres.h");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_codes_are_non_zero() {
        let errors = vec![
            BindgenError::configuration("bad prefix"),
            BindgenError::StrictMode { skipped: 3 },
            BindgenError::Generic(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            assert_ne!(err.exit_code(), 0, "{} should fail the process", err);
        }
    }

    #[test]
    fn test_generic_message_is_not_prefixed() {
        let err = BindgenError::Generic(anyhow::anyhow!("regex failed to compile"));
        assert_eq!(err.to_string(), "regex failed to compile");
    }

    #[test]
    fn test_configuration_with_path() {
        match BindgenError::configuration_in("empty api_marker", "bindgen.toml") {
            BindgenError::Configuration { message, path } => {
                assert_eq!(message, "empty api_marker");
                assert_eq!(path, Some(PathBuf::from("bindgen.toml")));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
