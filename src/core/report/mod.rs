//! CSV report output
//!
//! - [`ReportWriter`] - creates the report and appends match rows
//! - [`MaskingMode`] - how matched text appears in the `text` column

pub mod masking;
pub mod writer;

pub use masking::MaskingMode;
pub use writer::{ReportWriter, REPORT_COLUMNS};
