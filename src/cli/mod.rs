//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pii-scan using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// pii-scan - find Social Security Numbers in OCR'd PDFs with AWS Comprehend
#[derive(Parser, Debug)]
#[command(name = "pii-scan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "pii-scan.toml", env = "PII_SCAN_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_SCAN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan PDFs for PII and write a CSV report
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::MaskingMode;

    #[test]
    fn test_cli_parse_scan() {
        let cli = Cli::parse_from(["pii-scan", "scan", "./pdfs", "./out"]);
        assert_eq!(cli.config, "pii-scan.toml");
        match cli.command {
            Commands::Scan(args) => {
                assert_eq!(args.input.to_str(), Some("./pdfs"));
                assert_eq!(args.output.to_str(), Some("./out"));
                assert!(!args.single);
                assert!(args.masking.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_scan_options() {
        let cli = Cli::parse_from([
            "pii-scan",
            "scan",
            "claim.pdf",
            "./out",
            "--single",
            "--min-confidence",
            "0.9",
            "--masking",
            "redact",
            "--report-name",
            "ssn.csv",
        ]);
        match cli.command {
            Commands::Scan(args) => {
                assert!(args.single);
                assert_eq!(args.min_confidence, Some(0.9));
                assert_eq!(args.masking, Some(MaskingMode::Redact));
                assert_eq!(args.report_name.as_deref(), Some("ssn.csv"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_masking() {
        let result = Cli::try_parse_from(["pii-scan", "scan", "in", "out", "--masking", "blur"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_scan_requires_output() {
        assert!(Cli::try_parse_from(["pii-scan", "scan", "in"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["pii-scan", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["pii-scan", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
