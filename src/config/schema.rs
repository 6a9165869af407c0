//! Configuration schema types
//!
//! This module defines the configuration structure for pii-scan. Every
//! section validates itself and reports the first problem as a `String`.

use crate::config::SecretString;
use crate::core::report::MaskingMode;
use crate::domain::EntityType;
use serde::{Deserialize, Serialize};

/// Largest text block AWS Comprehend accepts in one `DetectPiiEntities` call
pub const SERVICE_MAX_TEXT_BYTES: usize = 100_000;

/// Language codes `DetectPiiEntities` supports
const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "es"];

/// Main pii-scan configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiScanConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// AWS credentials and Comprehend client settings
    pub aws: AwsConfig,

    /// Detection parameters
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PiiScanConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.aws.validate()?;
        self.detection.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for transient service errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err(format!(
                "aws.retry.max_retries must be <= 10, got {}",
                self.max_retries
            ));
        }

        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "aws.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }

        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "aws.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }

        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// AWS configuration for the Comprehend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region (e.g. "us-east-1")
    pub region: String,

    /// Access key ID
    pub access_key_id: String,

    /// Secret access key
    /// Stored securely in memory and automatically zeroized on drop
    pub secret_access_key: SecretString,

    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<SecretString>,

    /// Override for the Comprehend endpoint (VPC endpoints, testing)
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AwsConfig {
    /// Comprehend endpoint for this configuration
    pub fn endpoint(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://comprehend.{}.amazonaws.com", self.region),
        }
    }

    /// Access key ID with all but the last four characters hidden
    pub fn masked_access_key_id(&self) -> String {
        let hidden = self.access_key_id.chars().count().saturating_sub(4);
        self.access_key_id
            .chars()
            .enumerate()
            .map(|(i, c)| if i < hidden { '*' } else { c })
            .collect()
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.region.trim().is_empty() {
            return Err("aws.region cannot be empty".to_string());
        }

        if self.region.chars().any(char::is_whitespace) {
            return Err(format!("aws.region '{}' is not a valid region", self.region));
        }

        if self.access_key_id.trim().is_empty() {
            return Err("aws.access_key_id cannot be empty".to_string());
        }

        if !self.access_key_id.is_ascii() {
            return Err("aws.access_key_id must be ASCII".to_string());
        }

        if self.secret_access_key.expose_secret().is_empty() {
            return Err("aws.secret_access_key cannot be empty".to_string());
        }

        if let Some(url) = &self.endpoint_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("aws.endpoint_url must start with http:// or https://".to_string());
            }
            url::Url::parse(url)
                .map_err(|e| format!("aws.endpoint_url '{url}' is not a valid URL: {e}"))?;
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "aws.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        self.retry.validate()?;
        Ok(())
    }
}

/// Detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Language of the scanned documents
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Entity types kept as matches
    #[serde(default = "default_entity_types")]
    pub entity_types: Vec<EntityType>,

    /// Minimum confidence score for a match (0.0 - 1.0)
    #[serde(default)]
    pub min_confidence: f32,

    /// Largest text block submitted in one request, in UTF-8 bytes
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,

    /// Bytes shared between consecutive chunks of a page
    #[serde(default = "default_chunk_overlap_bytes")]
    pub chunk_overlap_bytes: usize,
}

impl DetectionConfig {
    /// Whether an entity of this type and score is kept as a match
    pub fn accepts(&self, entity_type: &EntityType, score: f32) -> bool {
        score >= self.min_confidence && self.entity_types.contains(entity_type)
    }

    fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_LANGUAGES.contains(&self.language_code.as_str()) {
            return Err(format!(
                "Invalid detection.language_code '{}'. Must be one of: {}",
                self.language_code,
                SUPPORTED_LANGUAGES.join(", ")
            ));
        }

        if self.entity_types.is_empty() {
            return Err("detection.entity_types cannot be empty".to_string());
        }

        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "detection.min_confidence must be between 0.0 and 1.0, got {}",
                self.min_confidence
            ));
        }

        if !(100..=SERVICE_MAX_TEXT_BYTES).contains(&self.max_chunk_bytes) {
            return Err(format!(
                "detection.max_chunk_bytes must be between 100 and {}, got {}",
                SERVICE_MAX_TEXT_BYTES, self.max_chunk_bytes
            ));
        }

        if self.chunk_overlap_bytes * 2 >= self.max_chunk_bytes {
            return Err(format!(
                "detection.chunk_overlap_bytes ({}) must be less than half of max_chunk_bytes ({})",
                self.chunk_overlap_bytes, self.max_chunk_bytes
            ));
        }

        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            language_code: default_language_code(),
            entity_types: default_entity_types(),
            min_confidence: 0.0,
            max_chunk_bytes: default_max_chunk_bytes(),
            chunk_overlap_bytes: default_chunk_overlap_bytes(),
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report file name inside the output directory
    #[serde(default = "default_report_file_name")]
    pub file_name: String,

    /// How matched text is written to the report
    #[serde(default)]
    pub masking: MaskingMode,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.file_name.trim().is_empty() {
            return Err("report.file_name cannot be empty".to_string());
        }

        if self.file_name.contains('/') || self.file_name.contains('\\') {
            return Err(format!(
                "report.file_name '{}' must be a file name, not a path",
                self.file_name
            ));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: default_report_file_name(),
            masking: MaskingMode::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Log file name (rotation appends a date suffix)
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        if self.file_name.trim().is_empty() {
            return Err("logging.file_name cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            file_name: default_log_file_name(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_entity_types() -> Vec<EntityType> {
    vec![EntityType::Ssn]
}

fn default_max_chunk_bytes() -> usize {
    5000
}

fn default_chunk_overlap_bytes() -> usize {
    64
}

fn default_report_file_name() -> String {
    "PII_Matches.csv".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_log_file_name() -> String {
    "PII_Logging.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn aws_config() -> AwsConfig {
        AwsConfig {
            region: "us-east-1".to_string(),
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: secret_string("secret".to_string()),
            session_token: None,
            endpoint_url: None,
            timeout_seconds: 30,
            retry: RetryConfig::default(),
        }
    }

    fn config() -> PiiScanConfig {
        PiiScanConfig {
            application: ApplicationConfig::default(),
            aws: aws_config(),
            detection: DetectionConfig::default(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_endpoint_from_region() {
        assert_eq!(
            aws_config().endpoint(),
            "https://comprehend.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn test_endpoint_override_trims_slash() {
        let mut aws = aws_config();
        aws.endpoint_url = Some("http://127.0.0.1:4566/".to_string());
        assert_eq!(aws.endpoint(), "http://127.0.0.1:4566");
    }

    #[test]
    fn test_masked_access_key_id() {
        assert_eq!(aws_config().masked_access_key_id(), "*******MPLE");
    }

    #[test]
    fn test_masked_access_key_id_non_ascii() {
        let mut cfg = aws_config();
        cfg.access_key_id = "ÄKIDÉXAMPLÉ".to_string();
        assert_eq!(cfg.masked_access_key_id(), "*******MPLÉ");

        cfg.access_key_id = "ÉÉ".to_string();
        assert_eq!(cfg.masked_access_key_id(), "ÉÉ");
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut cfg = config();
        cfg.aws.secret_access_key = secret_string(String::new());
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("secret_access_key"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut cfg = config();
        cfg.aws.endpoint_url = Some("ftp://example.com".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_invalid_language_rejected() {
        let mut cfg = config();
        cfg.detection.language_code = "fr".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_overlap_must_be_below_half_chunk() {
        let mut cfg = config();
        cfg.detection.max_chunk_bytes = 200;
        cfg.detection.chunk_overlap_bytes = 100;
        assert!(cfg.validate().is_err());

        cfg.detection.chunk_overlap_bytes = 99;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_chunk_size_bounded_by_service_limit() {
        let mut cfg = config();
        cfg.detection.max_chunk_bytes = SERVICE_MAX_TEXT_BYTES + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_min_confidence_range() {
        let mut cfg = config();
        cfg.detection.min_confidence = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_report_file_name_must_not_be_path() {
        let mut cfg = config();
        cfg.report.file_name = "../escape.csv".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_retry_bounds() {
        let mut cfg = config();
        cfg.aws.retry.max_retries = 11;
        assert!(cfg.validate().is_err());

        cfg.aws.retry.max_retries = 3;
        cfg.aws.retry.backoff_multiplier = 0.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_detection_accepts() {
        let detection = DetectionConfig {
            min_confidence: 0.8,
            ..DetectionConfig::default()
        };
        assert!(detection.accepts(&EntityType::Ssn, 0.95));
        assert!(!detection.accepts(&EntityType::Ssn, 0.5));
        assert!(!detection.accepts(&EntityType::Name, 0.99));
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut cfg = config();
        cfg.logging.local_rotation = "weekly".to_string();
        assert!(cfg.validate().is_err());
    }
}
