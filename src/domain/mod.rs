//! Domain models and types for pii-scan.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Documents** ([`PdfDocument`], [`ExtractedText`], [`PageText`])
//! - **Detection results** ([`EntityType`], [`DetectedEntity`], [`PiiMatch`])
//! - **Error types** ([`PiiScanError`], [`ExtractionError`], [`ServiceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, PiiScanError>`]:
//!
//! ```rust
//! use pii_scan::domain::{PiiScanError, Result};
//!
//! fn check(path: &std::path::Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(PiiScanError::Input(format!("{} does not exist", path.display())));
//!     }
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod entity;
pub mod errors;
pub mod matches;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{ExtractedText, PageText, PdfDocument};
pub use entity::{DetectedEntity, EntityType};
pub use errors::{ExtractionError, PiiScanError, ServiceError};
pub use matches::PiiMatch;
pub use result::Result;
