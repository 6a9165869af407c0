//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "pii-scan.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing pii-scan configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY");
                println!("     - Set AWS_SESSION_TOKEN when using temporary credentials");
                println!("  3. Validate configuration: pii-scan validate-config");
                println!("  4. Run a scan: pii-scan scan <PDF_DIR> <REPORT_DIR>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# pii-scan Configuration File
# Detects Social Security Numbers in OCR'd PDFs with AWS Comprehend

[application]
log_level = "info"

[aws]
region = "us-east-1"
access_key_id = "${AWS_ACCESS_KEY_ID}"
secret_access_key = "${AWS_SECRET_ACCESS_KEY}"

[detection]
entity_types = ["SSN"]
min_confidence = 0.0

[report]
file_name = "PII_Matches.csv"
masking = "partial"

[logging]
local_enabled = true
local_path = "./logs"
file_name = "PII_Logging.log"
"#
        .to_string()
    }

    /// Generate configuration with all options documented
    fn generate_config_with_examples() -> String {
        r#"# pii-scan Configuration File
# Detects Social Security Numbers in OCR'd PDFs with AWS Comprehend
#
# Values of the form ${VAR} are replaced with environment variables.
# Any key can also be overridden with PII_SCAN_<SECTION>_<KEY>,
# e.g. PII_SCAN_DETECTION_MIN_CONFIDENCE=0.9

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level: trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# AWS Comprehend
# ============================================================================
[aws]
region = "us-east-1"
access_key_id = "${AWS_ACCESS_KEY_ID}"
secret_access_key = "${AWS_SECRET_ACCESS_KEY}"

# Temporary credentials
# session_token = "${AWS_SESSION_TOKEN}"

# Custom endpoint (VPC endpoint, local emulator)
# endpoint_url = "https://comprehend.us-east-1.amazonaws.com"

# Per-request timeout in seconds (1 - 300)
timeout_seconds = 30

[aws.retry]
# Retries for throttling, timeouts, connection failures, and 5xx responses
max_retries = 3
initial_delay_ms = 500
max_delay_ms = 10000
backoff_multiplier = 2.0

# ============================================================================
# Detection
# ============================================================================
[detection]
# Language of the documents: en | es
language_code = "en"

# Entity types written to the report
entity_types = ["SSN"]

# Matches scoring below this are dropped (0.0 - 1.0)
min_confidence = 0.0

# Pages larger than this are split into chunks (100 - 100000 bytes)
max_chunk_bytes = 5000

# Bytes shared by neighbouring chunks (less than half of max_chunk_bytes)
chunk_overlap_bytes = 64

# ============================================================================
# Report
# ============================================================================
[report]
# Written inside the output directory; overwritten on every run
file_name = "PII_Matches.csv"

# How matched text appears in the report:
#   partial - ***-**-6789
#   redact  - [SSN]
#   hash    - sha256:<16 hex chars>
#   raw     - the matched text unchanged
masking = "partial"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log file in addition to console output
local_enabled = true
local_path = "./logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
file_name = "PII_Logging.log"
"#
        .to_string()
    }
}
