//! Scan run summary
//!
//! Counters and per-file skip reasons accumulated over one run.

use std::path::PathBuf;
use std::time::Duration;

/// Why a file contributed no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Text could not be extracted
    Extraction,
    /// The detection service failed for one of the file's chunks
    Service,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extraction => f.write_str("extraction"),
            Self::Service => f.write_str("service"),
        }
    }
}

/// A file skipped during the run
#[derive(Debug, Clone)]
pub struct SkippedFile {
    /// Display name of the file
    pub file: String,
    /// Category of the failure
    pub reason: SkipReason,
    /// Error message
    pub message: String,
}

/// Summary of one scan run
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// PDF files found under the target
    pub files_discovered: usize,

    /// Files fully processed
    pub files_scanned: usize,

    /// Files that contributed no rows because of an error
    pub skipped: Vec<SkippedFile>,

    /// Pages whose text was submitted for detection
    pub pages_scanned: usize,

    /// Pages without a searchable text layer
    pub pages_without_text: usize,

    /// Detection requests that succeeded
    pub chunks_submitted: usize,

    /// Rows written to the report
    pub matches_found: usize,

    /// Report file path
    pub report_path: PathBuf,

    /// Whether the run stopped early on a shutdown signal
    pub interrupted: bool,

    /// Duration of the run
    pub duration: Duration,
}

impl ScanSummary {
    /// Create an empty summary for a report at `report_path`
    pub fn new(report_path: PathBuf) -> Self {
        Self {
            report_path,
            ..Self::default()
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a skipped file
    pub fn add_skip(&mut self, file: &str, reason: SkipReason, message: String) {
        self.skipped.push(SkippedFile {
            file: file.to_string(),
            reason,
            message,
        });
    }

    /// Number of skipped files
    pub fn files_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Whether every discovered file was scanned
    pub fn is_successful(&self) -> bool {
        self.skipped.is_empty() && !self.interrupted
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            files_discovered = self.files_discovered,
            files_scanned = self.files_scanned,
            files_skipped = self.files_skipped(),
            pages_scanned = self.pages_scanned,
            pages_without_text = self.pages_without_text,
            chunks_submitted = self.chunks_submitted,
            matches_found = self.matches_found,
            report = %self.report_path.display(),
            duration_secs = self.duration.as_secs_f64(),
            interrupted = self.interrupted,
            "Scan completed"
        );

        for skipped in &self.skipped {
            tracing::warn!(
                file = %skipped.file,
                reason = %skipped.reason,
                message = %skipped.message,
                "File skipped"
            );
        }
    }
}
