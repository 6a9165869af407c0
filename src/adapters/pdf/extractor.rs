//! lopdf-backed text extraction

use super::TextExtractor;
use crate::domain::errors::ExtractionError;
use crate::domain::{ExtractedText, PageText};
use lopdf::Document;
use std::path::Path;

/// Extracts the text layer of each page with `lopdf`
///
/// Pages whose text layer is empty, or whose content cannot be decoded, are
/// logged and skipped.
#[derive(Debug, Clone, Default)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractionError> {
        let file = path.display().to_string();

        let bytes = std::fs::read(path).map_err(|e| ExtractionError::Unreadable {
            path: file.clone(),
            message: e.to_string(),
        })?;

        let document = Document::load_mem(&bytes).map_err(|e| ExtractionError::Corrupt {
            path: file.clone(),
            message: e.to_string(),
        })?;

        let pages = document.get_pages();
        let total_pages = pages.len();
        if total_pages == 0 {
            return Err(ExtractionError::NoPages(file));
        }

        let mut extracted = ExtractedText {
            pages: Vec::with_capacity(total_pages),
            total_pages,
        };

        for page_number in pages.keys().copied() {
            match document.extract_text(&[page_number]) {
                Ok(text) if !text.trim().is_empty() => {
                    extracted.pages.push(PageText {
                        number: page_number,
                        text,
                    });
                }
                Ok(_) => {
                    tracing::info!(
                        file = %file,
                        page = page_number,
                        total_pages,
                        "No searchable text on page {} of {}",
                        page_number,
                        total_pages
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        file = %file,
                        page = page_number,
                        error = %e,
                        "Failed to extract page text, skipping page"
                    );
                }
            }
        }

        if extracted.is_empty() {
            return Err(ExtractionError::NoTextLayer(file));
        }

        tracing::debug!(
            file = %file,
            pages_with_text = extracted.pages.len(),
            total_pages,
            "Extracted PDF text"
        );

        Ok(extracted)
    }
}
