//! Domain error types
//!
//! This module defines the error hierarchy for pii-scan. Errors are split by
//! how the scan pipeline reacts to them:
//!
//! - [`PiiScanError::Input`], [`PiiScanError::Write`] and
//!   [`PiiScanError::Configuration`] abort the run
//! - [`ExtractionError`] and [`ServiceError`] are recovered per file
//!
//! Third-party error types are converted to strings so they do not leak
//! through the public API.

use thiserror::Error;

/// Main pii-scan error type
#[derive(Debug, Error)]
pub enum PiiScanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Bad input target (missing, unreadable, wrong kind)
    #[error("Input error: {0}")]
    Input(String),

    /// Text extraction failed for a single PDF
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// PII detection service call failed
    #[error("Detection service error: {0}")]
    Service(#[from] ServiceError),

    /// Output directory or report file cannot be written
    #[error("Write error: {0}")]
    Write(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl PiiScanError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 2,
            Self::Input(_) => 3,
            Self::Write(_) => 4,
            _ => 5,
        }
    }
}

/// Errors raised while extracting text from a PDF
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// File could not be read from disk
    #[error("Failed to read {path}: {message}")]
    Unreadable { path: String, message: String },

    /// File is not a parseable PDF
    #[error("Failed to parse PDF {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Document has no pages
    #[error("PDF has no pages: {0}")]
    NoPages(String),

    /// No page carried a searchable text layer
    #[error("No OCR text in {0}")]
    NoTextLayer(String),
}

/// Errors returned by the PII detection service
///
/// Transient variants are retried by the scan pipeline before a file is skipped.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Credentials rejected, expired, or request signature invalid
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request rate exceeded
    #[error("Request throttled: {0}")]
    Throttled(String),

    /// Network-level failure before a response was received
    #[error("Failed to connect to detection service: {0}")]
    ConnectionFailed(String),

    /// Request exceeded its deadline
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Submitted text exceeds the service's size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be understood
    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Throttled(_)
                | Self::ConnectionFailed(_)
                | Self::Timeout(_)
                | Self::ServerError { .. }
        )
    }
}

impl From<std::io::Error> for PiiScanError {
    fn from(err: std::io::Error) -> Self {
        PiiScanError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PiiScanError {
    fn from(err: serde_json::Error) -> Self {
        PiiScanError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PiiScanError {
    fn from(err: toml::de::Error) -> Self {
        PiiScanError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for PiiScanError {
    fn from(err: csv::Error) -> Self {
        PiiScanError::Write(format!("CSV write failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PiiScanError::Input("/missing does not exist".to_string());
        assert_eq!(err.to_string(), "Input error: /missing does not exist");
    }

    #[test]
    fn test_extraction_error_conversion() {
        let err: PiiScanError = ExtractionError::NoTextLayer("a.pdf".to_string()).into();
        assert!(matches!(err, PiiScanError::Extraction(_)));
        assert_eq!(err.to_string(), "Extraction error: No OCR text in a.pdf");
    }

    #[test]
    fn test_service_error_conversion() {
        let err: PiiScanError = ServiceError::Throttled("slow down".to_string()).into();
        assert!(matches!(err, PiiScanError::Service(_)));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ServiceError::Throttled("x".into()).is_transient());
        assert!(ServiceError::Timeout("x".into()).is_transient());
        assert!(ServiceError::ConnectionFailed("x".into()).is_transient());
        assert!(ServiceError::ServerError {
            status: 503,
            message: "unavailable".into()
        }
        .is_transient());

        assert!(!ServiceError::AuthenticationFailed("x".into()).is_transient());
        assert!(!ServiceError::PayloadTooLarge("x".into()).is_transient());
        assert!(!ServiceError::ClientError {
            status: 400,
            message: "bad".into()
        }
        .is_transient());
        assert!(!ServiceError::InvalidResponse("x".into()).is_transient());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PiiScanError::Configuration("x".into()).exit_code(), 2);
        assert_eq!(PiiScanError::Input("x".into()).exit_code(), 3);
        assert_eq!(PiiScanError::Write("x".into()).exit_code(), 4);
        assert_eq!(PiiScanError::Other("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PiiScanError = io_err.into();
        assert!(matches!(err, PiiScanError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PiiScanError = toml_err.into();
        assert!(matches!(err, PiiScanError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &PiiScanError::Other("x".into());
        let _: &dyn std::error::Error = &ExtractionError::NoPages("x".into());
        let _: &dyn std::error::Error = &ServiceError::Timeout("x".into());
    }
}
