//! Mock chat model for tests: canned replies, no network.

use recap_types::{ChatModel, ChatRequest, LlmError};
use std::sync::Mutex;

enum Reply {
    Text(String),
    Empty,
    Fail(String),
}

/// Chat model that returns a fixed outcome and records every request it receives.
pub struct MockChatModel {
    reply: Reply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatModel {
    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with(Reply::Text(text.into()))
    }

    /// Answers successfully but with no content.
    pub fn empty() -> Self {
        Self::with(Reply::Empty)
    }

    /// Every call fails with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with(Reply::Fail(message.into()))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }
        match &self.reply {
            Reply::Text(t) => Ok(t.clone()),
            Reply::Empty => Err(LlmError::EmptyCompletion),
            Reply::Fail(msg) => Err(LlmError::Api {
                status: 500,
                body: msg.clone(),
            }),
        }
    }
}
