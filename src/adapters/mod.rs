//! External system integrations for pii-scan.
//!
//! - [`pdf`] - PDF text extraction ([`pdf::TextExtractor`], `lopdf`)
//! - [`comprehend`] - PII detection ([`comprehend::EntityDetector`], AWS Comprehend)
//!
//! The scan pipeline only sees the two traits, so tests run it against
//! canned extractors and detectors without touching PDFs or the network.

pub mod comprehend;
pub mod pdf;
