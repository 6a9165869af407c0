//! Masking of matched text before it reaches the report

use crate::domain::EntityType;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Characters left visible by [`MaskingMode::Partial`]
const VISIBLE_TAIL: usize = 4;

/// How matched text is written to the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskingMode {
    /// Matched text as found in the document
    Raw,
    /// All alphanumerics except the last four replaced with `*`
    #[default]
    Partial,
    /// Replaced with the entity label, e.g. `[SSN]`
    Redact,
    /// Truncated SHA-256 digest of the matched text
    Hash,
}

impl MaskingMode {
    /// Apply this mode to a matched value
    pub fn apply(&self, text: &str, entity_type: &EntityType) -> String {
        match self {
            Self::Raw => text.to_string(),
            Self::Partial => mask_partial(text),
            Self::Redact => format!("[{}]", entity_type.label()),
            Self::Hash => {
                let digest = Sha256::digest(text.as_bytes());
                format!("sha256:{}", &hex::encode(digest)[..16])
            }
        }
    }
}

fn mask_partial(text: &str) -> String {
    let alphanumerics = text.chars().filter(|c| c.is_alphanumeric()).count();
    // Short values are hidden entirely.
    let keep_from = if alphanumerics > VISIBLE_TAIL {
        alphanumerics - VISIBLE_TAIL
    } else {
        alphanumerics
    };

    let mut seen = 0;
    text.chars()
        .map(|c| {
            if !c.is_alphanumeric() {
                return c;
            }
            seen += 1;
            if seen > keep_from {
                c
            } else {
                '*'
            }
        })
        .collect()
}

impl FromStr for MaskingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "partial" => Ok(Self::Partial),
            "redact" => Ok(Self::Redact),
            "hash" => Ok(Self::Hash),
            other => Err(format!(
                "Invalid masking mode '{other}'. Must be one of: raw, partial, redact, hash"
            )),
        }
    }
}

impl fmt::Display for MaskingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Partial => "partial",
            Self::Redact => "redact",
            Self::Hash => "hash",
        };
        f.write_str(name)
    }
}
