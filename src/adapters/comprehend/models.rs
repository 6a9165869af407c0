//! AWS Comprehend `DetectPiiEntities` wire types
//!
//! The service speaks the AWS JSON 1.1 protocol: PascalCase request and
//! response members, and error bodies carrying a `__type` code.

use crate::domain::errors::ServiceError;
use crate::domain::{DetectedEntity, EntityType};
use serde::{Deserialize, Serialize};

/// Request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectPiiEntitiesRequest<'a> {
    /// Text to inspect
    pub text: &'a str,
    /// Language of the text
    pub language_code: &'a str,
}

/// Response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectPiiEntitiesResponse {
    /// Detected entities; absent when nothing was found
    #[serde(default)]
    pub entities: Vec<PiiEntity>,
}

/// One entity in a response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PiiEntity {
    /// Confidence score
    pub score: f32,
    /// Entity label, e.g. `SSN`
    #[serde(rename = "Type")]
    pub entity_type: String,
    /// Character offset of the first character
    pub begin_offset: usize,
    /// Character offset one past the last character
    pub end_offset: usize,
}

impl From<PiiEntity> for DetectedEntity {
    fn from(entity: PiiEntity) -> Self {
        DetectedEntity {
            entity_type: EntityType::from(entity.entity_type),
            score: entity.score,
            begin_offset: entity.begin_offset,
            end_offset: entity.end_offset,
        }
    }
}

/// Error body
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Error code, possibly prefixed with a namespace (`ns#Code`)
    #[serde(rename = "__type", default)]
    pub error_type: Option<String>,
    /// Human readable message
    #[serde(alias = "Message", default)]
    pub message: Option<String>,
}

/// Strip the namespace and any `:` suffix from an AWS error code
fn short_code(code: &str) -> &str {
    let code = code.rsplit('#').next().unwrap_or(code);
    code.split(':').next().unwrap_or(code)
}

/// Map an error response to a [`ServiceError`]
///
/// `header_type` is the value of the `x-amzn-ErrorType` header, used when the
/// body carries no `__type`.
pub fn classify_error(status: u16, header_type: Option<&str>, body: &str) -> ServiceError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed
        .error_type
        .as_deref()
        .or(header_type)
        .map(short_code)
        .unwrap_or("");
    let message = match parsed.message {
        Some(message) if !code.is_empty() => format!("{code}: {message}"),
        Some(message) => message,
        None if !code.is_empty() => code.to_string(),
        None => body.trim().to_string(),
    };

    match code {
        "ThrottlingException" | "TooManyRequestsException" => ServiceError::Throttled(message),
        "TextSizeLimitExceededException" => ServiceError::PayloadTooLarge(message),
        "UnrecognizedClientException"
        | "InvalidSignatureException"
        | "IncompleteSignature"
        | "MissingAuthenticationToken"
        | "AccessDeniedException"
        | "ExpiredTokenException" => ServiceError::AuthenticationFailed(message),
        "InternalServerException" => ServiceError::ServerError { status, message },
        _ => match status {
            429 => ServiceError::Throttled(message),
            413 => ServiceError::PayloadTooLarge(message),
            401 | 403 => ServiceError::AuthenticationFailed(message),
            500..=599 => ServiceError::ServerError { status, message },
            _ => ServiceError::ClientError { status, message },
        },
    }
}
