//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and an
//! optional rolling JSON log file.
//!
//! # Example
//!
//! ```no_run
//! use pii_scan::logging::init_logging;
//! use pii_scan::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(file = "a.pdf", "Scanning file");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a file scan
///
/// # Example
///
/// ```no_run
/// use pii_scan::log_file_start;
///
/// log_file_start!("claims/a.pdf", 3);
/// ```
#[macro_export]
macro_rules! log_file_start {
    ($file:expr, $index:expr) => {
        tracing::info!(file = %$file, index = $index, "Scanning file");
    };
}

/// Log a file that contributed no rows
///
/// # Example
///
/// ```no_run
/// use pii_scan::log_file_skipped;
///
/// log_file_skipped!("claims/a.pdf", "extraction", "No OCR text in claims/a.pdf");
/// ```
#[macro_export]
macro_rules! log_file_skipped {
    ($file:expr, $reason:expr, $error:expr) => {
        tracing::warn!(
            file = %$file,
            reason = %$reason,
            error = %$error,
            "Skipping file"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use pii_scan::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "DetectPiiEntities", "Request throttled");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_retries:expr, $operation:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_retries = $max_retries,
            operation = %$operation,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
