//! Speech-to-text and translation client (`audio/transcriptions`,
//! `audio/translations`).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::multipart;
use super::types::{TranscriptionRequest, TranscriptionResult};
use crate::error::HearsayError;
use crate::transport::{bearer_headers, shared_client, status_to_error, trim_trailing_slash};
use crate::util::retry::RetryPolicy;
use crate::util::timeout::with_timeout;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the remote speech endpoints.
///
/// Owns transport policy (timeout, retry); the request encoding itself never
/// performs I/O.
#[derive(Debug, Clone)]
pub struct AudioClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
}

impl AudioClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn new_with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Transcribe audio in its source language.
    pub async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResult, HearsayError> {
        self.audio(request, "transcriptions").await
    }

    /// Translate audio to English.
    ///
    /// The translation endpoint has no language parameter, so any `language`
    /// the caller supplied is discarded before encoding.
    pub async fn translate(
        &self,
        mut request: TranscriptionRequest,
    ) -> Result<TranscriptionResult, HearsayError> {
        request.language = None;
        self.audio(request, "translations").await
    }

    async fn audio(
        &self,
        request: TranscriptionRequest,
        endpoint: &str,
    ) -> Result<TranscriptionResult, HearsayError> {
        self.validate(&request)?;
        self.retry_policy
            .execute(|| self.audio_once(&request, endpoint))
            .await
    }

    fn validate(&self, request: &TranscriptionRequest) -> Result<(), HearsayError> {
        if self.api_key.trim().is_empty() {
            return Err(HearsayError::Authentication(
                "Missing API key for audio request".to_string(),
            ));
        }
        if request.model.trim().is_empty() {
            return Err(HearsayError::InvalidArgument(
                "Transcription model cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn audio_once(
        &self,
        request: &TranscriptionRequest,
        endpoint: &str,
    ) -> Result<TranscriptionResult, HearsayError> {
        let (body, boundary) = multipart::encode(request);

        let mut headers = bearer_headers(&self.api_key);
        headers.insert(
            CONTENT_TYPE,
            reqwest::header::HeaderValue::from_str(&format!(
                "multipart/form-data; boundary={boundary}"
            ))
            .map_err(|e| {
                HearsayError::Encoding(format!("Failed to build multipart content-type: {e}"))
            })?,
        );

        let url = format!("{}/audio/{endpoint}", trim_trailing_slash(&self.base_url));

        debug!(endpoint, model = %request.model, "audio request");

        with_timeout(self.timeout, async {
            let response = shared_client()
                .post(url)
                .headers(headers)
                .body(body)
                .send()
                .await?;

            parse_transcription_response(response).await
        })
        .await
    }
}

async fn parse_transcription_response(
    response: reqwest::Response,
) -> Result<TranscriptionResult, HearsayError> {
    let status = response.status().as_u16();
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        return Err(status_to_error(status, &body));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !content_type.starts_with("application/json") {
        return Err(HearsayError::InvalidState(format!(
            "Expected JSON transcription response, got '{content_type}'"
        )));
    }

    let body = response.text().await?;
    let parsed: TranscriptionResult = serde_json::from_str(&body)?;
    if parsed.text.trim().is_empty() {
        return Err(HearsayError::InvalidState(
            "Transcription response missing text".to_string(),
        ));
    }

    Ok(parsed)
}
