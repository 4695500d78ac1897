//! Shared test helpers: a scripted completion session.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use hearsay::chat::CompletionSession;
use hearsay::error::HearsayError;

enum Scripted {
    Reply(String),
    Fail(String),
}

/// A mock session that returns canned replies and records what it was asked.
pub struct MockSession {
    script: VecDeque<Scripted>,
    received: Arc<Mutex<Vec<String>>>,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a reply.
    pub fn queue_reply(mut self, text: &str) -> Self {
        self.script.push_back(Scripted::Reply(text.to_string()));
        self
    }

    /// Queue an error.
    pub fn queue_failure(mut self, message: &str) -> Self {
        self.script.push_back(Scripted::Fail(message.to_string()));
        self
    }

    /// Handle to the messages the session has been asked to complete.
    pub fn received(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.received)
    }
}

#[async_trait]
impl CompletionSession for MockSession {
    async fn complete(&mut self, message: &str) -> Result<String, HearsayError> {
        self.received.lock().unwrap().push(message.to_string());
        match self.script.pop_front() {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Fail(message)) => Err(HearsayError::InvalidState(message)),
            None => Err(HearsayError::InvalidState(
                "no scripted response left".to_string(),
            )),
        }
    }
}
