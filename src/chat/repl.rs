//! Interactive read-eval-print loop over a completion session.
//!
//! One sequential cycle: read a line, complete, render, repeat. A
//! `CancellationToken` ends the loop; the token is checked at the top of each
//! iteration and raced against the blocking read, so a signal never waits on
//! input. A completion already in flight is allowed to finish.

use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::render::MarkdownRenderer;
use super::session::CompletionSession;
use crate::error::HearsayError;

/// Default persona used when the caller supplies none.
pub const DEFAULT_PERSONALITY: &str = "Sigmund Freud";

/// Fallback response label when no personality-derived one applies.
const GENERIC_LABEL: &str = "Response";

/// Configuration for the interactive loop.
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Persona the assistant answers as; also drives the response label.
    pub personality: String,
    /// Overrides the personality-derived system prompt when non-empty.
    pub prompt: Option<String>,
    /// ANSI colors on prompts and markdown highlighting of responses.
    pub colors: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            personality: DEFAULT_PERSONALITY.to_string(),
            prompt: None,
            colors: true,
        }
    }
}

impl ReplOptions {
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    /// Set an override prompt. An empty string means "no override".
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        self.prompt = (!prompt.is_empty()).then_some(prompt);
        self
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn override_prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// The system prompt the session is seeded with.
    pub fn system_prompt(&self) -> String {
        match self.override_prompt() {
            Some(prompt) => prompt.to_string(),
            None => format!(
                "You answer in the speaking style of {}.",
                self.personality
            ),
        }
    }

    /// The label printed before each response: the personality's first name,
    /// or a generic label when a custom prompt overrides the persona.
    pub fn response_label(&self) -> String {
        if self.override_prompt().is_some() {
            return GENERIC_LABEL.to_string();
        }
        self.personality
            .split_whitespace()
            .next()
            .unwrap_or(GENERIC_LABEL)
            .to_string()
    }
}

/// The interactive completion loop.
pub struct ChatRepl<S> {
    session: S,
    options: ReplOptions,
    cancel: CancellationToken,
}

impl<S: CompletionSession> ChatRepl<S> {
    pub fn new(session: S, options: ReplOptions) -> Self {
        Self {
            session,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// A token that ends the loop when cancelled. Hand a clone to whatever
    /// watches for the out-of-band signal (e.g. a Ctrl-C listener).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the loop until cancellation or end of input.
    ///
    /// Input and completion errors are fatal and propagate to the caller;
    /// cancellation is a clean, silent exit.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> Result<(), HearsayError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let renderer = self.options.colors.then(MarkdownRenderer::new);
        let you_marker = self.user_marker();
        let response_marker = self.label_marker(&self.options.response_label());

        let mut lines = input.lines();

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            output.write_all(you_marker.as_bytes()).await?;
            output.flush().await?;

            let line = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                line = lines.next_line() => match line? {
                    Some(line) => line,
                    None => break,
                },
            };

            let response = self.session.complete(&line).await?;

            output.write_all(response_marker.as_bytes()).await?;
            let rendered = match &renderer {
                Some(renderer) => renderer.render(&response),
                None => response,
            };
            output.write_all(rendered.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }

        Ok(())
    }

    fn user_marker(&self) -> String {
        if self.options.colors {
            style("You: ").green().force_styling(true).to_string()
        } else {
            "You: ".to_string()
        }
    }

    fn label_marker(&self, label: &str) -> String {
        if self.options.colors {
            style(format!("{label}: "))
                .yellow()
                .force_styling(true)
                .to_string()
        } else {
            format!("{label}: ")
        }
    }
}
