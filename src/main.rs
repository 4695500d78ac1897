//! hearsay CLI binary entry point.

use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;

use hearsay::audio::{AudioClient, TranscriptionRequest};
use hearsay::chat::{ChatRepl, ChatSession, ReplOptions};
use hearsay::cli::{AudioArgs, ChatArgs, Cli, Commands};
use hearsay::config::Config;
use hearsay::error::Result;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let result = match cli.command {
        Commands::Chat(args) => handle_chat(&config, args).await,
        Commands::Transcribe(args) => handle_transcribe(&config, args).await,
        Commands::Translate(args) => handle_translate(&config, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(config: &Config, args: ChatArgs) -> Result<()> {
    let api_key = config.require_api_key()?;

    let options = ReplOptions::default()
        .with_personality(args.personality)
        .with_prompt(args.prompt)
        .with_colors(args.colors);

    let mut session =
        ChatSession::new(api_key.to_string(), options.system_prompt()).with_model(args.model);
    if let Some(base_url) = config.base_url() {
        session = session.with_base_url(base_url);
    }

    let repl = ChatRepl::new(session, options);

    // One watcher: trip the loop's token on Ctrl-C.
    let cancel = repl.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received, cancelling chat loop");
            cancel.cancel();
        }
    });

    repl.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}

async fn handle_transcribe(config: &Config, args: AudioArgs) -> Result<()> {
    let client = audio_client(config)?;
    let request = audio_request(&args).await?;
    let result = client.transcribe(request).await?;
    println!("{}", result.text);
    Ok(())
}

async fn handle_translate(config: &Config, args: AudioArgs) -> Result<()> {
    let client = audio_client(config)?;
    let request = audio_request(&args).await?;
    let result = client.translate(request).await?;
    println!("{}", result.text);
    Ok(())
}

fn audio_client(config: &Config) -> Result<AudioClient> {
    let api_key = config.require_api_key()?.to_string();
    Ok(match config.base_url() {
        Some(base_url) => AudioClient::new_with_base_url(api_key, base_url),
        None => AudioClient::new(api_key),
    })
}

async fn audio_request(args: &AudioArgs) -> Result<TranscriptionRequest> {
    let audio = tokio::fs::read(&args.file).await?;
    let mut request = TranscriptionRequest::new_with_model(audio, &args.model);
    if let Some(ref prompt) = args.prompt {
        request = request.with_prompt(prompt);
    }
    if let Some(temperature) = args.temperature {
        request = request.with_temperature(temperature);
    }
    if let Some(format) = args.response_format {
        request = request.with_response_format(format);
    }
    if let Some(ref language) = args.language {
        request = request.with_language(language);
    }
    Ok(request)
}
