//! AWS Comprehend HTTP client

use super::models::{classify_error, DetectPiiEntitiesRequest, DetectPiiEntitiesResponse};
use super::EntityDetector;
use crate::config::AwsConfig;
use crate::domain::errors::{PiiScanError, ServiceError};
use crate::domain::result::Result;
use crate::domain::DetectedEntity;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    sign, SignableBody, SignableRequest, SigningParams, SigningSettings,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::{Duration, SystemTime};
use url::Url;

/// Signing name of the Comprehend service
pub const SERVICE_NAME: &str = "comprehend";

/// `X-Amz-Target` of the `DetectPiiEntities` operation
pub const DETECT_PII_TARGET: &str = "Comprehend_20171127.DetectPiiEntities";

/// Content type of the AWS JSON 1.1 protocol
pub const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Client for the Comprehend `DetectPiiEntities` operation
///
/// Each call is a single SigV4-signed request bounded by the configured
/// timeout. Retrying transient failures is left to the caller.
pub struct ComprehendClient {
    http: Client,
    endpoint: Url,
    region: String,
    identity: Identity,
}

impl ComprehendClient {
    /// Create a client from AWS configuration
    ///
    /// # Errors
    ///
    /// Returns [`PiiScanError::Configuration`] if the endpoint is not a valid
    /// URL or the HTTP client cannot be built.
    pub fn new(config: &AwsConfig) -> Result<Self> {
        let endpoint_str = config.endpoint();
        let endpoint = Url::parse(&endpoint_str).map_err(|e| {
            PiiScanError::Configuration(format!(
                "Invalid Comprehend endpoint '{endpoint_str}': {e}"
            ))
        })?;

        let timeout = Duration::from_secs(config.timeout_seconds);
        let http = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| {
                PiiScanError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.expose_secret().as_ref(),
            config
                .session_token
                .as_ref()
                .map(|token| token.expose_secret().as_ref().to_string()),
            None,
            "pii-scan-config",
        );

        tracing::debug!(
            endpoint = %endpoint,
            region = %config.region,
            access_key_id = %config.masked_access_key_id(),
            timeout_secs = config.timeout_seconds,
            "Comprehend client created"
        );

        Ok(Self {
            http,
            endpoint,
            region: config.region.clone(),
            identity: credentials.into(),
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// SigV4 headers (`x-amz-date`, `authorization`, and the session token
    /// when present) for a `DetectPiiEntities` request with `body`
    fn signing_headers(
        &self,
        body: &[u8],
        time: SystemTime,
    ) -> std::result::Result<Vec<(String, String)>, ServiceError> {
        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&self.identity)
            .region(&self.region)
            .name(SERVICE_NAME)
            .time(time)
            .settings(SigningSettings::default())
            .build()
            .map_err(signing_error)?
            .into();

        let request = SignableRequest::new(
            "POST",
            self.endpoint.as_str(),
            [
                ("content-type", JSON_CONTENT_TYPE),
                ("x-amz-target", DETECT_PII_TARGET),
            ]
            .into_iter(),
            SignableBody::Bytes(body),
        )
        .map_err(signing_error)?;

        let (instructions, _signature) = sign(request, &params)
            .map_err(signing_error)?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }

    fn transport_error(error: reqwest::Error) -> ServiceError {
        if error.is_timeout() {
            ServiceError::Timeout(error.to_string())
        } else {
            ServiceError::ConnectionFailed(error.to_string())
        }
    }
}

fn signing_error(error: impl std::fmt::Display) -> ServiceError {
    ServiceError::AuthenticationFailed(format!("Failed to sign request: {error}"))
}

#[async_trait]
impl EntityDetector for ComprehendClient {
    async fn detect_entities(
        &self,
        text: &str,
        language_code: &str,
    ) -> std::result::Result<Vec<DetectedEntity>, ServiceError> {
        let body = serde_json::to_vec(&DetectPiiEntitiesRequest {
            text,
            language_code,
        })
        .map_err(|e| ServiceError::InvalidResponse(format!("Failed to encode request: {e}")))?;

        let signing_headers = self.signing_headers(&body, SystemTime::now())?;

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header("X-Amz-Target", DETECT_PII_TARGET);
        for (name, value) in signing_headers {
            request = request.header(name, value);
        }

        tracing::debug!(bytes = body.len(), "Sending DetectPiiEntities request");

        let response = request
            .body(body)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let header_type = response
                .headers()
                .get("x-amzn-ErrorType")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            let error = classify_error(status.as_u16(), header_type.as_deref(), &body);
            tracing::debug!(status = status.as_u16(), error = %error, "DetectPiiEntities failed");
            return Err(error);
        }

        let bytes = response.bytes().await.map_err(Self::transport_error)?;
        let parsed: DetectPiiEntitiesResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        Ok(parsed.entities.into_iter().map(Into::into).collect())
    }
}
