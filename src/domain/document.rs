//! PDF documents and their extracted text

use std::path::{Path, PathBuf};

/// A PDF file queued for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    path: PathBuf,
    display_name: String,
}

impl PdfDocument {
    /// Create a document whose display name is its path relative to `root`
    ///
    /// Falls back to the file name when `path` is not under `root`.
    pub fn under_root(path: PathBuf, root: &Path) -> Self {
        let display_name = match path.strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                relative.to_string_lossy().replace('\\', "/")
            }
            _ => file_name_of(&path),
        };
        Self { path, display_name }
    }

    /// Create a document displayed by its file name
    pub fn single(path: PathBuf) -> Self {
        let display_name = file_name_of(&path);
        Self { path, display_name }
    }

    /// Filesystem path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name used in logs and the report
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Text of one PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    /// Extracted text
    pub text: String,
}

/// Text extracted from a PDF, one entry per page that had a text layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// Pages with searchable text, in page order
    pub pages: Vec<PageText>,
    /// Number of pages in the document, including those without text
    pub total_pages: usize,
}

impl ExtractedText {
    /// Number of pages that had no searchable text
    pub fn pages_without_text(&self) -> usize {
        self.total_pages.saturating_sub(self.pages.len())
    }

    /// Whether no page produced text
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_relative_to_root() {
        let doc = PdfDocument::under_root(
            PathBuf::from("/scans/2024/march/a.pdf"),
            Path::new("/scans"),
        );
        assert_eq!(doc.display_name(), "2024/march/a.pdf");
        assert_eq!(doc.path(), Path::new("/scans/2024/march/a.pdf"));
    }

    #[test]
    fn test_display_name_outside_root() {
        let doc = PdfDocument::under_root(PathBuf::from("/other/b.pdf"), Path::new("/scans"));
        assert_eq!(doc.display_name(), "b.pdf");
    }

    #[test]
    fn test_single_document_uses_file_name() {
        let doc = PdfDocument::single(PathBuf::from("/scans/c.pdf"));
        assert_eq!(doc.display_name(), "c.pdf");
    }

    #[test]
    fn test_pages_without_text() {
        let text = ExtractedText {
            pages: vec![PageText {
                number: 2,
                text: "hello".to_string(),
            }],
            total_pages: 3,
        };
        assert_eq!(text.pages_without_text(), 2);
        assert!(!text.is_empty());
        assert!(ExtractedText::default().is_empty());
    }
}
