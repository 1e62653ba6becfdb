//! Traits for the two outbound providers, and the error types shared across crates.

use crate::{ChatRequest, OutgoingEmail};
use async_trait::async_trait;

/// Chat-completion provider: messages in, first choice's text out.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion. Returns `LlmError::EmptyCompletion` when the provider
    /// answers successfully but without any choice content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

/// Email relay: delivers one email to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the email; returns the provider's response text.
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError>;
}

/// Missing or empty required request fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Transcript and instruction are required")]
    MissingTranscriptOrInstruction,
    #[error("Recipients are required")]
    MissingRecipients,
    #[error("Email body cannot be empty")]
    EmptyBody,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: status {status}, body: {body}")]
    Api { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("completion had no content")]
    EmptyCompletion,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("relay rejected email: status {status}, body: {body}")]
    Api { status: u16, body: String },
}
