//! Scan pipeline - main orchestrator of a scan run
//!
//! Files are processed strictly one after another:
//! walk → extract (blocking pool) → chunk → detect (with retry) → report.
//! A file's matches are buffered and written only once every chunk of the
//! file has been checked, so a file skipped part-way leaves no rows behind.

use super::chunker::{char_span, Chunker, TextChunk};
use super::retry::RetryPolicy;
use super::summary::{ScanSummary, SkipReason};
use super::walker::ScanTarget;
use crate::adapters::comprehend::{ComprehendClient, EntityDetector};
use crate::adapters::pdf::{LopdfExtractor, TextExtractor};
use crate::config::{DetectionConfig, PiiScanConfig, ReportConfig};
use crate::core::report::ReportWriter;
use crate::domain::errors::ServiceError;
use crate::domain::{DetectedEntity, ExtractedText, PageText, PdfDocument, PiiMatch, Result};
use crate::{log_file_skipped, log_file_start};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Counters and matches of one successfully scanned file
#[derive(Debug, Default)]
struct FileScan {
    matches: Vec<PiiMatch>,
    pages_scanned: usize,
    pages_without_text: usize,
    chunks_submitted: usize,
}

/// Why a file was skipped
#[derive(Debug)]
struct FileFailure {
    reason: SkipReason,
    message: String,
}

impl FileFailure {
    fn service(error: ServiceError) -> Self {
        Self {
            reason: SkipReason::Service,
            message: error.to_string(),
        }
    }
}

/// Scan pipeline
pub struct ScanPipeline {
    extractor: Arc<dyn TextExtractor>,
    detector: Arc<dyn EntityDetector>,
    detection: DetectionConfig,
    report: ReportConfig,
    chunker: Chunker,
    retry: RetryPolicy,
    shutdown: watch::Receiver<bool>,
}

impl ScanPipeline {
    /// Create a pipeline from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PiiScanError::Configuration`] if the chunk
    /// sizes are unusable.
    pub fn new(
        config: &PiiScanConfig,
        extractor: Arc<dyn TextExtractor>,
        detector: Arc<dyn EntityDetector>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self> {
        let chunker = Chunker::new(
            config.detection.max_chunk_bytes,
            config.detection.chunk_overlap_bytes,
        )?;

        Ok(Self {
            extractor,
            detector,
            detection: config.detection.clone(),
            report: config.report.clone(),
            chunker,
            retry: RetryPolicy::from_config(&config.aws.retry),
            shutdown,
        })
    }

    /// Create a pipeline using lopdf extraction and AWS Comprehend detection
    pub fn from_config(config: &PiiScanConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let detector = Arc::new(ComprehendClient::new(&config.aws)?);
        Self::new(config, Arc::new(LopdfExtractor::new()), detector, shutdown)
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Scan `target` and write the report into `output_dir`
    ///
    /// Extraction and detection failures skip the affected file and are
    /// recorded in the summary.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::PiiScanError::Input`] for an unusable target
    /// and [`crate::domain::PiiScanError::Write`] if the report cannot be
    /// created or written. Both are raised before any file is opened, except
    /// write failures while appending rows.
    pub async fn run(&self, target: &ScanTarget, output_dir: &Path) -> Result<ScanSummary> {
        let start_time = Instant::now();

        let documents = target.documents()?;
        let mut writer =
            ReportWriter::create(output_dir, &self.report.file_name, self.report.masking)?;
        let mut summary = ScanSummary::new(writer.path().to_path_buf());

        tracing::info!(
            target = %target.path().display(),
            report = %writer.path().display(),
            masking = %self.report.masking,
            "Starting scan"
        );

        for document in documents {
            if *self.shutdown.borrow() {
                tracing::info!("Shutdown requested, stopping before next file");
                summary.interrupted = true;
                break;
            }

            summary.files_discovered += 1;
            log_file_start!(document.display_name(), summary.files_discovered);

            match self.scan_document(&document).await {
                Ok(scan) => {
                    writer.write_matches(&scan.matches)?;
                    summary.files_scanned += 1;
                    summary.pages_scanned += scan.pages_scanned;
                    summary.pages_without_text += scan.pages_without_text;
                    summary.chunks_submitted += scan.chunks_submitted;
                    tracing::info!(
                        file = %document.display_name(),
                        matches = scan.matches.len(),
                        pages = scan.pages_scanned,
                        "File scanned"
                    );
                }
                Err(failure) => {
                    log_file_skipped!(document.display_name(), failure.reason, failure.message);
                    summary.add_skip(document.display_name(), failure.reason, failure.message);
                }
            }
        }

        let (report_path, rows) = writer.finish()?;
        summary.report_path = report_path;
        summary.matches_found = rows;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn scan_document(
        &self,
        document: &PdfDocument,
    ) -> std::result::Result<FileScan, FileFailure> {
        let extracted = self.extract(document).await?;

        let mut scan = FileScan {
            pages_without_text: extracted.pages_without_text(),
            ..FileScan::default()
        };

        for page in &extracted.pages {
            let page_matches = self.scan_page(document, page, &mut scan).await?;
            scan.matches.extend(page_matches);
            scan.pages_scanned += 1;
        }

        Ok(scan)
    }

    async fn extract(
        &self,
        document: &PdfDocument,
    ) -> std::result::Result<ExtractedText, FileFailure> {
        let extractor = Arc::clone(&self.extractor);
        let path = document.path().to_path_buf();

        let result = tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(|e| FileFailure {
                reason: SkipReason::Extraction,
                message: format!("Extraction task failed: {e}"),
            })?;

        result.map_err(|e| FileFailure {
            reason: SkipReason::Extraction,
            message: e.to_string(),
        })
    }

    async fn scan_page(
        &self,
        document: &PdfDocument,
        page: &PageText,
        scan: &mut FileScan,
    ) -> std::result::Result<Vec<PiiMatch>, FileFailure> {
        let mut matches = Vec::new();

        for chunk in self.chunker.split(&page.text) {
            let entities = self
                .retry
                .run("DetectPiiEntities", || {
                    self.detector
                        .detect_entities(chunk.text, &self.detection.language_code)
                })
                .await
                .map_err(FileFailure::service)?;
            scan.chunks_submitted += 1;

            for entity in entities {
                if !self.detection.accepts(&entity.entity_type, entity.score) {
                    continue;
                }
                if let Some(pii_match) = to_match(document, page, &chunk, entity) {
                    matches.push(pii_match);
                }
            }
        }

        Ok(collapse_duplicates(matches))
    }
}

/// Attribute a chunk-relative entity to its file and page
fn to_match(
    document: &PdfDocument,
    page: &PageText,
    chunk: &TextChunk<'_>,
    entity: DetectedEntity,
) -> Option<PiiMatch> {
    if entity.end_offset > chunk.char_len() {
        tracing::warn!(
            file = %document.display_name(),
            page = page.number,
            begin = entity.begin_offset,
            end = entity.end_offset,
            "Entity offsets outside submitted text, ignoring"
        );
        return None;
    }

    let (begin_offset, end_offset) = chunk.to_page_offsets(entity.begin_offset, entity.end_offset);
    let text = char_span(&page.text, begin_offset, end_offset)?;

    Some(PiiMatch {
        file: document.display_name().to_string(),
        page: page.number,
        entity_type: entity.entity_type,
        text: text.to_string(),
        begin_offset,
        end_offset,
        score: entity.score,
    })
}

/// Report each span once, keeping the highest score, in page order
fn collapse_duplicates(matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
    let mut kept: Vec<PiiMatch> = Vec::with_capacity(matches.len());
    for candidate in matches {
        match kept
            .iter_mut()
            .find(|existing| existing.span_key() == candidate.span_key())
        {
            Some(existing) => {
                if candidate.score > existing.score {
                    *existing = candidate;
                }
            }
            None => kept.push(candidate),
        }
    }
    kept.sort_by_key(|m| (m.begin_offset, m.end_offset));
    kept
}
