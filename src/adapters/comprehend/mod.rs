//! AWS Comprehend PII detection
//!
//! The scan pipeline depends on the [`EntityDetector`] trait.
//! [`ComprehendClient`] implements it over the Comprehend JSON API with
//! SigV4-signed requests.
//!
//! ```rust,no_run
//! use pii_scan::adapters::comprehend::{ComprehendClient, EntityDetector};
//! use pii_scan::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pii-scan.toml")?;
//! let client = ComprehendClient::new(&config.aws)?;
//! let entities = client.detect_entities("SSN: 123-45-6789", "en").await?;
//! println!("{} entities", entities.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod models;

pub use client::ComprehendClient;

use crate::domain::errors::ServiceError;
use crate::domain::DetectedEntity;
use async_trait::async_trait;

/// Detects PII entities in a block of text
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Detect entities in `text`
    ///
    /// Offsets in the result are character offsets into `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] describing why detection failed.
    async fn detect_entities(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<DetectedEntity>, ServiceError>;
}
