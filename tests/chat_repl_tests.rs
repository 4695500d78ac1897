#![cfg(feature = "repl")]

mod common;

use std::time::Duration;

use hearsay::chat::{ChatRepl, ReplOptions};
use hearsay::error::HearsayError;
use tokio::io::BufReader;

use common::MockSession;

fn plain_options() -> ReplOptions {
    ReplOptions::default().with_colors(false)
}

#[tokio::test]
async fn one_iteration_reads_completes_and_renders() {
    let session = MockSession::new().queue_reply("world");
    let received = session.received();

    let repl = ChatRepl::new(session, plain_options());
    let mut output = Vec::new();
    repl.run(b"hello\n".as_slice(), &mut output).await.unwrap();

    assert_eq!(*received.lock().unwrap(), vec!["hello".to_string()]);
    let output = String::from_utf8(output).unwrap();
    // Response for iteration N is rendered before the prompt for N+1.
    assert_eq!(output, "You: Sigmund: world\nYou: ");
}

#[tokio::test]
async fn override_prompt_uses_generic_label() {
    let session = MockSession::new().queue_reply("aye");

    let repl = ChatRepl::new(
        session,
        plain_options().with_prompt("You are a pirate."),
    );
    let mut output = Vec::new();
    repl.run(b"hi\n".as_slice(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Response: aye\n"));
    assert!(!output.contains("Sigmund"));
}

#[tokio::test]
async fn colors_wrap_markers_in_ansi_sequences() {
    let session = MockSession::new().queue_reply("world");

    let repl = ChatRepl::new(session, ReplOptions::default().with_colors(true));
    let mut output = Vec::new();
    repl.run(b"hello\n".as_slice(), &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("\x1b[32mYou: \x1b[0m"), "green user marker");
    assert!(
        output.contains("\x1b[33mSigmund: \x1b[0m"),
        "yellow response marker"
    );
    assert!(output.contains("world"));
}

#[tokio::test]
async fn eof_exits_cleanly_without_completing() {
    let session = MockSession::new();
    let received = session.received();

    let repl = ChatRepl::new(session, plain_options());
    let mut output = Vec::new();
    repl.run(b"".as_slice(), &mut output).await.unwrap();

    assert!(received.lock().unwrap().is_empty());
    assert_eq!(String::from_utf8(output).unwrap(), "You: ");
}

#[tokio::test]
async fn cancellation_while_blocked_on_input_returns_promptly() {
    let session = MockSession::new();
    let received = session.received();

    let repl = ChatRepl::new(session, plain_options());
    let cancel = repl.cancellation_token();

    // A reader that never produces a line, like an idle terminal.
    let (reader, _writer) = tokio::io::duplex(64);
    let handle = tokio::spawn(repl.run(BufReader::new(reader), Vec::new()));

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("loop must unblock on cancellation")
        .unwrap();

    assert!(result.is_ok(), "cancellation is a clean exit");
    assert!(
        received.lock().unwrap().is_empty(),
        "no completion may start after cancellation"
    );
}

#[tokio::test]
async fn pre_cancelled_token_skips_the_first_read() {
    let session = MockSession::new();
    let received = session.received();

    let repl = ChatRepl::new(session, plain_options());
    repl.cancellation_token().cancel();

    let mut output = Vec::new();
    repl.run(b"hello\n".as_slice(), &mut output).await.unwrap();

    assert!(received.lock().unwrap().is_empty());
    assert!(output.is_empty(), "no prompt is printed after cancellation");
}

#[tokio::test]
async fn completion_errors_are_fatal() {
    let session = MockSession::new().queue_failure("session exploded");

    let repl = ChatRepl::new(session, plain_options());
    let mut output = Vec::new();
    let err = repl
        .run(b"hello\nagain\n".as_slice(), &mut output)
        .await
        .unwrap_err();

    assert!(
        matches!(err, HearsayError::InvalidState(message) if message.contains("session exploded"))
    );
    // The loop stops at the failure: only one prompt was printed.
    assert_eq!(String::from_utf8(output).unwrap(), "You: ");
}
