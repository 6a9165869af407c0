//! Configuration management for pii-scan.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation. The loaded [`PiiScanConfig`] is passed explicitly into the
//! scan pipeline; nothing reads configuration from global state.
//!
//! # Overview
//!
//! pii-scan configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PII_SCAN_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every section
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`AwsConfig`] - Credentials, region, endpoint, timeout, [`RetryConfig`]
//! - [`DetectionConfig`] - Language, entity types, confidence threshold, chunking
//! - [`ReportConfig`] - Report file name and masking mode
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [aws]
//! region = "us-east-1"
//! access_key_id = "${AWS_ACCESS_KEY_ID}"
//! secret_access_key = "${AWS_SECRET_ACCESS_KEY}"
//!
//! [detection]
//! entity_types = ["SSN"]
//! min_confidence = 0.5
//!
//! [report]
//! masking = "partial"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AwsConfig, DetectionConfig, LoggingConfig, PiiScanConfig, ReportConfig,
    RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
