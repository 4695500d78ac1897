//! Convenience re-exports for common use.

pub use crate::audio::{AudioClient, ResponseFormat, TranscriptionRequest, TranscriptionResult};
pub use crate::chat::{ChatMessage, ChatSession, CompletionSession, Role};
pub use crate::config::Config;
pub use crate::error::{HearsayError, Result};

#[cfg(feature = "repl")]
pub use crate::chat::{ChatRepl, ReplOptions};
