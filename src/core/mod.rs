//! Core scan logic for pii-scan.
//!
//! # Modules
//!
//! - [`scan`] - Directory walking, chunking, retry, and the scan pipeline
//! - [`report`] - CSV report writing and masking
//!
//! # Scan Workflow
//!
//! 1. **Resolve target**: a directory (recursive) or a single PDF
//! 2. **Open report**: truncate the report and write its header
//! 3. **Extract**: per-page text via the PDF extractor
//! 4. **Detect**: chunk each page and call the detection service
//! 5. **Report**: write the file's matches, then move to the next file
//! 6. **Summarize**: counters, skipped files, and duration
//!
//! # Example
//!
//! ```rust,no_run
//! use pii_scan::config::load_config;
//! use pii_scan::core::scan::{ScanPipeline, ScanTarget};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii-scan.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let pipeline = ScanPipeline::from_config(&config, shutdown_rx)?;
//! let target = ScanTarget::resolve(Path::new("./pdfs"), false)?;
//! let summary = pipeline.run(&target, Path::new("./out")).await?;
//!
//! println!("Scanned: {}", summary.files_scanned);
//! println!("Matches: {}", summary.matches_found);
//! # Ok(())
//! # }
//! ```

pub mod report;
pub mod scan;
