//! Scan command implementation
//!
//! This module implements the `scan` command: walk the input, detect PII,
//! and write the CSV report into the output directory.

use crate::config::PiiScanConfig;
use crate::core::report::MaskingMode;
use crate::core::scan::{ScanPipeline, ScanSummary, ScanTarget};
use crate::domain::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::sync::watch;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// A directory of PDF files (or one PDF file with --single)
    pub input: PathBuf,

    /// Directory the CSV report is written to
    pub output: PathBuf,

    /// Scan a single PDF file instead of a directory
    #[arg(long)]
    pub single: bool,

    /// Override the minimum confidence score (0.0 - 1.0)
    #[arg(long, value_name = "SCORE")]
    pub min_confidence: Option<f32>,

    /// Override how matched text is written (raw, partial, redact, hash)
    #[arg(long, value_name = "MODE")]
    pub masking: Option<MaskingMode>,

    /// Override the report file name
    #[arg(long, value_name = "NAME")]
    pub report_name: Option<String>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(
        &self,
        config: Result<PiiScanConfig>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(
            input = %self.input.display(),
            output = %self.output.display(),
            single = self.single,
            "Starting scan command"
        );

        let mut config = match config {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(e.exit_code());
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let target = match ScanTarget::resolve(&self.input, self.single) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(error = %e, "Invalid scan target");
                eprintln!("{e}");
                return Ok(e.exit_code());
            }
        };

        let pipeline = match ScanPipeline::from_config(&config, shutdown_signal) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scan pipeline");
                eprintln!("Failed to initialize scan: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("🔍 Scanning {}", self.input.display());
        println!();

        let summary = match pipeline.run(&target, &self.output).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Scan failed");
                eprintln!("Scan failed: {e}");
                return Ok(e.exit_code());
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Scan interrupted. The report holds the files completed so far.");
            tracing::info!("Scan interrupted by user signal");
            130
        } else if summary.is_successful() {
            println!("✅ Scan completed successfully!");
            0
        } else {
            println!("⚠️  Scan completed with skipped files");
            0
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut PiiScanConfig) {
        if let Some(min_confidence) = self.min_confidence {
            tracing::info!(min_confidence, "Overriding minimum confidence from CLI");
            config.detection.min_confidence = min_confidence;
        }
        if let Some(masking) = self.masking {
            tracing::info!(masking = %masking, "Overriding masking mode from CLI");
            config.report.masking = masking;
        }
        if let Some(report_name) = &self.report_name {
            tracing::info!(report_name = %report_name, "Overriding report name from CLI");
            config.report.file_name = report_name.clone();
        }
    }
}

fn print_summary(summary: &ScanSummary) {
    println!();
    println!("📊 Scan Summary:");
    println!("  Files Scanned: {}", summary.files_scanned);
    println!("  Files Skipped: {}", summary.files_skipped());
    println!("  Pages Scanned: {}", summary.pages_scanned);
    println!("  Pages Without Text: {}", summary.pages_without_text);
    println!("  Matches Found: {}", summary.matches_found);
    println!("  Report: {}", summary.report_path.display());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.skipped.is_empty() {
        println!("⚠️  Skipped files:");
        for skipped in &summary.skipped {
            println!("  - {} ({}): {}", skipped.file, skipped.reason, skipped.message);
        }
        println!();
    }
}
