//! Audio capabilities: transcription and translation.

pub mod client;
mod multipart;
pub mod types;

pub use client::AudioClient;
pub use types::{ResponseFormat, TranscriptionRequest, TranscriptionResult};
