//! CSV report writer
//!
//! One report is written per run. The file is truncated and its header row
//! written when the writer is created, so a bad output directory is reported
//! before any PDF is opened.

use super::masking::MaskingMode;
use crate::domain::errors::PiiScanError;
use crate::domain::matches::PiiMatch;
use crate::domain::result::Result;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Report columns in output order
pub const REPORT_COLUMNS: [&str; 7] = [
    "file",
    "text",
    "score",
    "type",
    "page",
    "begin_offset",
    "end_offset",
];

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    file: &'a str,
    text: String,
    score: String,
    #[serde(rename = "type")]
    entity_type: &'a str,
    page: u32,
    begin_offset: usize,
    end_offset: usize,
}

/// Writes PII matches to the run's CSV report
pub struct ReportWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    masking: MaskingMode,
    rows_written: usize,
}

impl ReportWriter {
    /// Create (or truncate) `file_name` inside `output_dir` and write the header
    ///
    /// # Errors
    ///
    /// Returns [`PiiScanError::Write`] if `output_dir` is missing or not a
    /// directory, or the report file cannot be created.
    pub fn create(output_dir: &Path, file_name: &str, masking: MaskingMode) -> Result<Self> {
        if !output_dir.exists() {
            return Err(PiiScanError::Write(format!(
                "Output directory does not exist: {}",
                output_dir.display()
            )));
        }
        if !output_dir.is_dir() {
            return Err(PiiScanError::Write(format!(
                "Output path is not a directory: {}",
                output_dir.display()
            )));
        }

        let path = output_dir.join(file_name);
        let file = File::create(&path).map_err(|e| {
            PiiScanError::Write(format!(
                "Failed to create report {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(REPORT_COLUMNS)?;
        writer.flush().map_err(|e| {
            PiiScanError::Write(format!("Failed to write report header: {e}"))
        })?;

        tracing::debug!(path = %path.display(), masking = %masking, "Report created");

        Ok(Self {
            path,
            writer,
            masking,
            rows_written: 0,
        })
    }

    /// Append one match as a report row
    pub fn write_match(&mut self, pii_match: &PiiMatch) -> Result<()> {
        let row = ReportRow {
            file: &pii_match.file,
            text: self.masking.apply(&pii_match.text, &pii_match.entity_type),
            score: format!("{:.4}", pii_match.score),
            entity_type: pii_match.entity_type.label(),
            page: pii_match.page,
            begin_offset: pii_match.begin_offset,
            end_offset: pii_match.end_offset,
        };
        self.writer.serialize(row)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Append all matches of one file and flush them to disk
    pub fn write_matches(&mut self, matches: &[PiiMatch]) -> Result<()> {
        for pii_match in matches {
            self.write_match(pii_match)?;
        }
        self.writer
            .flush()
            .map_err(|e| PiiScanError::Write(format!("Failed to flush report: {e}")))
    }

    /// Report file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the report, returning its path and row count
    pub fn finish(mut self) -> Result<(PathBuf, usize)> {
        self.writer
            .flush()
            .map_err(|e| PiiScanError::Write(format!("Failed to finalize report: {e}")))?;
        tracing::debug!(
            path = %self.path.display(),
            rows = self.rows_written,
            "Report finalized"
        );
        Ok((self.path, self.rows_written))
    }
}
