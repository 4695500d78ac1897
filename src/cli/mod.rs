//! CLI entry point for hearsay.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::audio::types::{ResponseFormat, DEFAULT_TRANSCRIPTION_MODEL};
use crate::chat::repl::DEFAULT_PERSONALITY;

/// hearsay CLI
#[derive(Parser, Debug)]
#[command(name = "hearsay", version, about = "Speech-to-text and chat CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with somebody
    Chat(ChatArgs),
    /// Transcribe an audio file in its source language
    Transcribe(AudioArgs),
    /// Translate an audio file to English
    Translate(AudioArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Personality the assistant answers as
    #[arg(long, default_value = DEFAULT_PERSONALITY)]
    pub personality: String,

    /// A system prompt to override the default
    #[arg(long, default_value = "")]
    pub prompt: String,

    /// Colorize the output
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub colors: bool,

    /// Model to use
    #[arg(short, long, default_value = "gpt-4o")]
    pub model: String,
}

/// Arguments for the `transcribe` and `translate` subcommands.
#[derive(Parser, Debug)]
pub struct AudioArgs {
    /// Path to the audio file
    pub file: PathBuf,

    /// Model to use
    #[arg(short, long, default_value = DEFAULT_TRANSCRIPTION_MODEL)]
    pub model: String,

    /// Optional priming context
    #[arg(long)]
    pub prompt: Option<String>,

    /// Sampling temperature (0.0 - 1.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Response format (json, text, srt, verbose_json, vtt)
    #[arg(long)]
    pub response_format: Option<ResponseFormat>,

    /// Input-language hint (ignored by `translate`)
    #[arg(short, long)]
    pub language: Option<String>,
}
