//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiScanConfig;
use super::secret::secret_string;
use crate::domain::entity::EntityType;
use crate::domain::errors::PiiScanError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`PiiScanConfig`]
/// 4. Applies environment variable overrides (PII_SCAN_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PiiScanError::Configuration`] if the file cannot be read or
/// parsed, a referenced environment variable is not set, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use pii_scan::config::loader::load_config;
///
/// let config = load_config("pii-scan.toml").expect("Failed to load config");
/// println!("Region: {}", config.aws.region);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiScanConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiiScanError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiiScanError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PiiScanConfig = toml::from_str(&contents)
        .map_err(|e| PiiScanError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PiiScanError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged. All missing variables are reported
/// in a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PiiScanError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PiiScanError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PII_SCAN_* prefix
///
/// Environment variables follow the pattern PII_SCAN_<SECTION>_<KEY>, for
/// example PII_SCAN_AWS_REGION or PII_SCAN_DETECTION_MIN_CONFIDENCE.
/// Unparseable numeric values are ignored; an unknown masking mode is an
/// error.
fn apply_env_overrides(config: &mut PiiScanConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PII_SCAN_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // AWS overrides
    if let Ok(val) = std::env::var("PII_SCAN_AWS_REGION") {
        config.aws.region = val;
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_ACCESS_KEY_ID") {
        config.aws.access_key_id = val;
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_SECRET_ACCESS_KEY") {
        config.aws.secret_access_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_SESSION_TOKEN") {
        config.aws.session_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_ENDPOINT_URL") {
        config.aws.endpoint_url = Some(val);
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.aws.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("PII_SCAN_AWS_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.aws.retry.max_retries = retries;
        }
    }

    // Detection overrides
    if let Ok(val) = std::env::var("PII_SCAN_DETECTION_LANGUAGE_CODE") {
        config.detection.language_code = val;
    }
    if let Ok(val) = std::env::var("PII_SCAN_DETECTION_ENTITY_TYPES") {
        let types: Vec<EntityType> = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| EntityType::from(s.to_string()))
            .collect();
        if !types.is_empty() {
            config.detection.entity_types = types;
        }
    }
    if let Ok(val) = std::env::var("PII_SCAN_DETECTION_MIN_CONFIDENCE") {
        if let Ok(threshold) = val.parse() {
            config.detection.min_confidence = threshold;
        }
    }
    if let Ok(val) = std::env::var("PII_SCAN_DETECTION_MAX_CHUNK_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.detection.max_chunk_bytes = bytes;
        }
    }
    if let Ok(val) = std::env::var("PII_SCAN_DETECTION_CHUNK_OVERLAP_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.detection.chunk_overlap_bytes = bytes;
        }
    }

    // Report overrides
    if let Ok(val) = std::env::var("PII_SCAN_REPORT_FILE_NAME") {
        config.report.file_name = val;
    }
    if let Ok(val) = std::env::var("PII_SCAN_REPORT_MASKING") {
        config.report.masking = val.parse().map_err(PiiScanError::Configuration)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PII_SCAN_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PII_SCAN_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
