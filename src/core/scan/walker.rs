//! Discovery of PDF files under the scan target

use crate::domain::errors::PiiScanError;
use crate::domain::result::Result;
use crate::domain::PdfDocument;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What a scan run reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// Every PDF below a directory, recursively
    Directory(PathBuf),
    /// One PDF file
    Single(PathBuf),
}

impl ScanTarget {
    /// Resolve the input argument against the `--single` flag
    ///
    /// # Errors
    ///
    /// Returns [`PiiScanError::Input`] if the path does not exist or its kind
    /// does not match the mode.
    pub fn resolve(input: &Path, single: bool) -> Result<Self> {
        if !input.exists() {
            return Err(PiiScanError::Input(format!(
                "Input path does not exist: {}",
                input.display()
            )));
        }

        match (single, input.is_dir()) {
            (true, false) => Ok(Self::Single(input.to_path_buf())),
            (false, true) => Ok(Self::Directory(input.to_path_buf())),
            (true, true) => Err(PiiScanError::Input(format!(
                "--single expects a PDF file, but {} is a directory",
                input.display()
            ))),
            (false, false) => Err(PiiScanError::Input(format!(
                "{} is not a directory (use --single to scan one file)",
                input.display()
            ))),
        }
    }

    /// Target path
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Single(path) => path,
        }
    }

    /// Lazily enumerate the documents to scan
    pub fn documents(&self) -> Result<Box<dyn Iterator<Item = PdfDocument> + Send>> {
        match self {
            Self::Directory(root) => Ok(Box::new(PdfWalker::new(root)?)),
            Self::Single(path) => Ok(Box::new(std::iter::once(PdfDocument::single(
                path.clone(),
            )))),
        }
    }
}

/// Recursive, file-name ordered walk yielding PDF files
///
/// Symlinks are not followed. Entries that cannot be read are logged and
/// skipped.
pub struct PdfWalker {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

impl PdfWalker {
    /// Start a walk at `root`
    ///
    /// # Errors
    ///
    /// Returns [`PiiScanError::Input`] if `root` is missing, not a directory,
    /// or cannot be listed.
    pub fn new(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(PiiScanError::Input(format!(
                "Input directory does not exist: {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(PiiScanError::Input(format!(
                "Input path is not a directory: {}",
                root.display()
            )));
        }
        std::fs::read_dir(root).map_err(|e| {
            PiiScanError::Input(format!(
                "Input directory is not readable: {}: {}",
                root.display(),
                e
            ))
        })?;

        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }
}

impl Iterator for PdfWalker {
    type Item = PdfDocument;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        path = ?e.path(),
                        error = %e,
                        "Skipping unreadable directory entry"
                    );
                    continue;
                }
            };

            if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
                return Some(PdfDocument::under_root(entry.into_path(), &self.root));
            }
        }
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
