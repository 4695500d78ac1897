//! Conversational completion: stateful sessions and the interactive loop.

pub mod session;

#[cfg(feature = "repl")]
pub mod render;
#[cfg(feature = "repl")]
pub mod repl;

pub use session::{ChatMessage, ChatSession, CompletionSession, Role};

#[cfg(feature = "repl")]
pub use render::MarkdownRenderer;
#[cfg(feature = "repl")]
pub use repl::{ChatRepl, ReplOptions};
