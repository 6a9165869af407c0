//! Scan orchestration
//!
//! - [`walker`] - PDF discovery under the scan target
//! - [`chunker`] - service-sized page chunks
//! - [`retry`] - backoff for transient service errors
//! - [`coordinator`] - the [`ScanPipeline`] itself
//! - [`summary`] - run counters and skipped files

pub mod chunker;
pub mod coordinator;
pub mod retry;
pub mod summary;
pub mod walker;

pub use chunker::{Chunker, TextChunk};
pub use coordinator::ScanPipeline;
pub use retry::RetryPolicy;
pub use summary::{ScanSummary, SkipReason, SkippedFile};
pub use walker::{PdfWalker, ScanTarget};
