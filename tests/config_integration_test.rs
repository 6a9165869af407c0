//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interfering with each other.

use pii_scan::config::load_config;
use pii_scan::core::report::MaskingMode;
use pii_scan::domain::{EntityType, PiiScanError};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "PII_SCAN_APPLICATION_LOG_LEVEL",
        "PII_SCAN_AWS_REGION",
        "PII_SCAN_AWS_SESSION_TOKEN",
        "PII_SCAN_DETECTION_MIN_CONFIDENCE",
        "PII_SCAN_DETECTION_ENTITY_TYPES",
        "PII_SCAN_REPORT_MASKING",
        "PII_SCAN_REPORT_FILE_NAME",
        "TEST_PII_SCAN_ACCESS_KEY",
        "TEST_PII_SCAN_SECRET_KEY",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const MINIMAL: &str = r#"
[aws]
region = "us-east-1"
access_key_id = "AKIDEXAMPLE"
secret_access_key = "secret"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[aws]
region = "eu-west-1"
access_key_id = "AKIDEXAMPLE"
secret_access_key = "secret-key"
session_token = "session-token"
endpoint_url = "http://localhost:4566"
timeout_seconds = 10

[aws.retry]
max_retries = 5
initial_delay_ms = 100
max_delay_ms = 1000
backoff_multiplier = 1.5

[detection]
language_code = "es"
entity_types = ["SSN", "NAME"]
min_confidence = 0.8
max_chunk_bytes = 4000
chunk_overlap_bytes = 100

[report]
file_name = "ssn_report.csv"
masking = "hash"

[logging]
local_enabled = true
local_path = "/tmp/pii-scan-logs"
local_rotation = "hourly"
file_name = "scan.log"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.aws.region, "eu-west-1");
    assert_eq!(config.aws.secret_access_key.expose_secret(), "secret-key");
    assert!(config.aws.session_token.is_some());
    assert_eq!(config.aws.endpoint(), "http://localhost:4566");
    assert_eq!(config.aws.timeout_seconds, 10);
    assert_eq!(config.aws.retry.max_retries, 5);
    assert_eq!(config.aws.retry.backoff_multiplier, 1.5);
    assert_eq!(config.detection.language_code, "es");
    assert_eq!(
        config.detection.entity_types,
        vec![EntityType::Ssn, EntityType::Name]
    );
    assert_eq!(config.detection.min_confidence, 0.8);
    assert_eq!(config.detection.max_chunk_bytes, 4000);
    assert_eq!(config.report.file_name, "ssn_report.csv");
    assert_eq!(config.report.masking, MaskingMode::Hash);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
    assert_eq!(config.logging.file_name, "scan.log");
}

#[test]
fn test_defaults_applied() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(MINIMAL);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.aws.timeout_seconds, 30);
    assert_eq!(config.aws.retry.max_retries, 3);
    assert_eq!(config.detection.language_code, "en");
    assert_eq!(config.detection.entity_types, vec![EntityType::Ssn]);
    assert_eq!(config.detection.min_confidence, 0.0);
    assert_eq!(config.detection.max_chunk_bytes, 5000);
    assert_eq!(config.report.file_name, "PII_Matches.csv");
    assert_eq!(config.report.masking, MaskingMode::Partial);
    assert_eq!(config.logging.file_name, "PII_Logging.log");
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_PII_SCAN_ACCESS_KEY", "AKIDFROMENV");
    std::env::set_var("TEST_PII_SCAN_SECRET_KEY", "secret-from-env");

    let temp_file = write_config(
        r#"
[aws]
region = "us-east-1"
access_key_id = "${TEST_PII_SCAN_ACCESS_KEY}"
secret_access_key = "${TEST_PII_SCAN_SECRET_KEY}"
"#,
    );
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.aws.access_key_id, "AKIDFROMENV");
    assert_eq!(
        config.aws.secret_access_key.expose_secret(),
        "secret-from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_config_error() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[aws]
region = "us-east-1"
access_key_id = "${TEST_PII_SCAN_ACCESS_KEY}"
secret_access_key = "${TEST_PII_SCAN_SECRET_KEY}"
"#,
    );
    let err = load_config(temp_file.path()).unwrap_err();

    assert!(matches!(err, PiiScanError::Configuration(_)));
    assert_eq!(err.exit_code(), 2);
    let message = err.to_string();
    assert!(message.contains("TEST_PII_SCAN_ACCESS_KEY"));
    assert!(message.contains("TEST_PII_SCAN_SECRET_KEY"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("PII_SCAN_AWS_REGION", "us-west-2");
    std::env::set_var("PII_SCAN_DETECTION_MIN_CONFIDENCE", "0.95");
    std::env::set_var("PII_SCAN_DETECTION_ENTITY_TYPES", "ssn, bank_account_number");
    std::env::set_var("PII_SCAN_REPORT_MASKING", "redact");

    let temp_file = write_config(MINIMAL);
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.aws.region, "us-west-2");
    assert_eq!(config.detection.min_confidence, 0.95);
    assert_eq!(
        config.detection.entity_types,
        vec![EntityType::Ssn, EntityType::BankAccountNumber]
    );
    assert_eq!(config.report.masking, MaskingMode::Redact);

    cleanup_env_vars();
}

#[test]
fn test_invalid_masking_override_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("PII_SCAN_REPORT_MASKING", "blur");

    let temp_file = write_config(MINIMAL);
    let result = load_config(temp_file.path());

    cleanup_env_vars();
    assert!(matches!(result, Err(PiiScanError::Configuration(_))));
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        "[detection]\nmin_confidence = 1.5\n",
        "[detection]\nlanguage_code = \"fr\"\n",
        "[detection]\nmax_chunk_bytes = 200000\n",
        "[report]\nmasking = \"blur\"\n",
        "[report]\nfile_name = \"../escape.csv\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];

    for case in cases {
        let temp_file = write_config(&format!("{MINIMAL}\n{case}"));
        let result = load_config(temp_file.path());
        assert!(
            matches!(result, Err(PiiScanError::Configuration(_))),
            "expected rejection for: {case}"
        );
    }
}

#[test]
fn test_missing_aws_section_rejected() {
    let temp_file = write_config("[application]\nlog_level = \"info\"\n");
    let result = load_config(temp_file.path());
    assert!(matches!(result, Err(PiiScanError::Configuration(_))));
}
