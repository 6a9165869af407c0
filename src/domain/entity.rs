//! PII entity types and detection results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PII entity type as labelled by the detection service
///
/// Labels follow the AWS Comprehend `DetectPiiEntities` vocabulary. Types the
/// crate has no variant for are kept verbatim in [`EntityType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    /// Social Security Numbers
    Ssn,
    /// Person names
    Name,
    /// Postal addresses
    Address,
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Dates and times
    DateTime,
    /// Bank account numbers
    BankAccountNumber,
    /// Bank routing numbers
    BankRouting,
    /// Credit or debit card numbers
    CreditDebitNumber,
    /// Passport numbers
    PassportNumber,
    /// Driver's license identifiers
    DriverId,
    /// Any other label returned by the service
    Other(String),
}

impl EntityType {
    /// Service label for this entity type
    pub fn label(&self) -> &str {
        match self {
            Self::Ssn => "SSN",
            Self::Name => "NAME",
            Self::Address => "ADDRESS",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::DateTime => "DATE_TIME",
            Self::BankAccountNumber => "BANK_ACCOUNT_NUMBER",
            Self::BankRouting => "BANK_ROUTING",
            Self::CreditDebitNumber => "CREDIT_DEBIT_NUMBER",
            Self::PassportNumber => "PASSPORT_NUMBER",
            Self::DriverId => "DRIVER_ID",
            Self::Other(label) => label,
        }
    }
}

impl FromStr for EntityType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "SSN" => Self::Ssn,
            "NAME" => Self::Name,
            "ADDRESS" => Self::Address,
            "EMAIL" => Self::Email,
            "PHONE" => Self::Phone,
            "DATE_TIME" => Self::DateTime,
            "BANK_ACCOUNT_NUMBER" => Self::BankAccountNumber,
            "BANK_ROUTING" => Self::BankRouting,
            "CREDIT_DEBIT_NUMBER" => Self::CreditDebitNumber,
            "PASSPORT_NUMBER" => Self::PassportNumber,
            "DRIVER_ID" => Self::DriverId,
            _ => Self::Other(upper),
        })
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(entity_type) => entity_type,
            Err(never) => match never {},
        }
    }
}

impl From<EntityType> for String {
    fn from(entity_type: EntityType) -> Self {
        entity_type.label().to_string()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entity returned by the detection service for one submitted text block
///
/// Offsets are character offsets relative to the submitted text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedEntity {
    /// Entity type label
    pub entity_type: EntityType,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// First character of the entity
    pub begin_offset: usize,
    /// One past the last character of the entity
    pub end_offset: usize,
}
