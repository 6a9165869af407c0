//! Validate config command implementation
//!
//! This module implements the `validate-config` command. Secrets are never
//! printed; the access key ID is shown masked.

use crate::config::PiiScanConfig;
use crate::domain::Result;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: &str,
        config: Result<PiiScanConfig>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match config {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                print_config_summary(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn print_config_summary(config: &PiiScanConfig) {
    let entity_types: Vec<&str> = config
        .detection
        .entity_types
        .iter()
        .map(|t| t.label())
        .collect();

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  AWS Region: {}", config.aws.region);
    println!("  AWS Access Key ID: {}", config.aws.masked_access_key_id());
    println!(
        "  AWS Session Token: {}",
        if config.aws.session_token.is_some() {
            "set"
        } else {
            "not set"
        }
    );
    println!("  Comprehend Endpoint: {}", config.aws.endpoint());
    println!("  Request Timeout: {}s", config.aws.timeout_seconds);
    println!("  Max Retries: {}", config.aws.retry.max_retries);
    println!("  Language: {}", config.detection.language_code);
    println!("  Entity Types: {}", entity_types.join(", "));
    println!("  Min Confidence: {}", config.detection.min_confidence);
    println!(
        "  Chunk Size: {} bytes ({} bytes overlap)",
        config.detection.max_chunk_bytes, config.detection.chunk_overlap_bytes
    );
    println!("  Report File: {}", config.report.file_name);
    println!("  Masking: {}", config.report.masking);
    if config.logging.local_enabled {
        println!(
            "  Log File: {}/{} ({})",
            config.logging.local_path, config.logging.file_name, config.logging.local_rotation
        );
    } else {
        println!("  Log File: disabled");
    }
    println!();
}
