//! Audio request and response types.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::HearsayError;

/// Default transcription model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

/// A speech-to-text (or translation) request.
///
/// The payload is opaque to this crate: no size or codec validation happens
/// here, the remote service is the arbiter of what it accepts.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Raw audio bytes.
    pub audio: Vec<u8>,
    /// Model identifier, e.g. `whisper-1`.
    pub model: String,
    /// Optional priming context for the transcription.
    pub prompt: Option<String>,
    /// Optional sampling temperature.
    pub temperature: Option<f64>,
    /// Optional response format.
    pub response_format: Option<ResponseFormat>,
    /// Optional input-language hint. Ignored by the translation endpoint.
    pub language: Option<String>,
}

impl TranscriptionRequest {
    /// Create a request for the default model.
    pub fn new(audio: Vec<u8>) -> Self {
        Self::new_with_model(audio, DEFAULT_TRANSCRIPTION_MODEL)
    }

    /// Create a request for a specific model.
    pub fn new_with_model(audio: Vec<u8>, model: impl Into<String>) -> Self {
        Self {
            audio,
            model: model.into(),
            prompt: None,
            temperature: None,
            response_format: None,
            language: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Transcript output formats accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Text,
    Srt,
    VerboseJson,
    Vtt,
}

impl ResponseFormat {
    /// Wire name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Srt => "srt",
            Self::VerboseJson => "verbose_json",
            Self::Vtt => "vtt",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = HearsayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "srt" => Ok(Self::Srt),
            "verbose_json" => Ok(Self::VerboseJson),
            "vtt" => Ok(Self::Vtt),
            other => Err(HearsayError::InvalidArgument(format!(
                "Unknown response format: {other}"
            ))),
        }
    }
}

/// A decoded transcript or translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptionResult {
    /// The transcribed (or translated) text.
    pub text: String,
}
