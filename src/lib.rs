//! hearsay: speech-to-text, translation, and conversational client for
//! OpenAI-style APIs.
//!
//! Provides a multipart request encoder and client for the remote
//! `audio/transcriptions` and `audio/translations` endpoints, a stateful
//! chat completion session, and an interactive terminal loop with
//! cooperative cancellation.
//!
//! # Quick Start
//!
//! ```no_run
//! use hearsay::audio::{AudioClient, TranscriptionRequest};
//!
//! # async fn example() -> hearsay::error::Result<()> {
//! let client = AudioClient::new("sk-...".to_string());
//! let request = TranscriptionRequest::new(std::fs::read("clip.wav")?);
//! let result = client.transcribe(request).await?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod chat;
pub mod config;
pub mod error;
pub mod prelude;
pub mod transport;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
