// pii-scan - SSN detection for OCR'd PDFs with AWS Comprehend
// Copyright (c) 2026 pii-scan Contributors
// Licensed under the MIT License

//! # pii-scan
//!
//! pii-scan finds U.S. Social Security Numbers in PDFs that were OCR'd and
//! carry a searchable text layer. Page text is sent to AWS Comprehend
//! `DetectPiiEntities`; matches are written to a CSV report.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Scan pipeline, chunking, retries, and the CSV report
//! - [`adapters`] - PDF text extraction and the Comprehend client
//! - [`domain`] - Documents, entities, matches, and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pii_scan::config::load_config;
//! use pii_scan::core::scan::{ScanPipeline, ScanTarget};
//! use std::path::Path;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("pii-scan.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!
//!     let pipeline = ScanPipeline::from_config(&config, shutdown_rx)?;
//!     let target = ScanTarget::resolve(Path::new("./claims"), false)?;
//!     let summary = pipeline.run(&target, Path::new("./reports")).await?;
//!
//!     println!("{} matches in {}", summary.matches_found, summary.report_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fatal errors are [`domain::PiiScanError`]. Per-file problems
//! ([`domain::ExtractionError`], [`domain::ServiceError`]) skip the file and
//! are listed in the [`core::scan::ScanSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
