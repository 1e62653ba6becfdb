//! OpenAI-compatible chat-completion client.

#[cfg(feature = "test-util")]
pub mod mock;
mod openai;

pub use openai::{ChatSettings, OpenAiChatClient, DEFAULT_API_URL, DEFAULT_MODEL};
pub use recap_types::{ChatModel, ChatRequest, LlmError, Message};

#[cfg(feature = "test-util")]
pub use mock::MockChatModel;
