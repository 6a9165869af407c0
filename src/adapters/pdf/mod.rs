//! PDF text extraction
//!
//! The scan pipeline depends on the [`TextExtractor`] trait so tests can
//! substitute canned page text. [`LopdfExtractor`] is the production
//! implementation.

pub mod extractor;

pub use extractor::LopdfExtractor;

use crate::domain::errors::ExtractionError;
use crate::domain::ExtractedText;
use std::path::Path;

/// Extracts per-page text from a PDF file
///
/// Implementations are synchronous; the pipeline runs them on the blocking
/// thread pool.
pub trait TextExtractor: Send + Sync {
    /// Extract the text layer of every page of `path`
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if the file cannot be read or parsed,
    /// has no pages, or no page carries searchable text.
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError>;
}
