//! Result type alias for pii-scan

use super::errors::PiiScanError;

/// Result type alias for pii-scan operations
///
/// # Examples
///
/// ```
/// use pii_scan::domain::result::Result;
/// use pii_scan::domain::errors::PiiScanError;
///
/// fn failing_function() -> Result<()> {
///     Err(PiiScanError::Input("missing".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PiiScanError>;
