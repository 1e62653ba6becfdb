//! TranscriptSummarizer: builds the summarization prompt and runs one chat completion.

use recap_types::{ChatModel, ChatRequest, LlmError, Message, SummaryRequest, ValidationError};
use std::str::FromStr;
use std::sync::Arc;

pub const SYSTEM_PROMPT: &str = "\
You are an assistant that summarizes meeting/call transcripts into clear, concise, factual outputs.
- Follow the user's custom instruction exactly.
- Prefer bullet points and headings.
- Include \"Action Items\", \"Decisions\", \"Risks/Blockers\", and \"Owners\" when relevant.
- Be neutral; no hallucinations. If unsure, say \"Not specified\".
- Keep it under 300 words unless the instruction asks otherwise.";

/// Returned in place of a summary when the provider answers with no content
/// and the policy is [`EmptySummaryPolicy::Placeholder`].
pub const PLACEHOLDER_SUMMARY: &str = "No summary could be generated.";

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// What to do when the provider succeeds but returns no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySummaryPolicy {
    /// Answer with [`PLACEHOLDER_SUMMARY`] and log a warning.
    #[default]
    Placeholder,
    /// Treat it as an upstream failure.
    Error,
}

impl FromStr for EmptySummaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "error" => Ok(Self::Error),
            other => Err(format!(
                "unknown empty summary policy '{}': expected 'placeholder' or 'error'",
                other
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("llm: {0}")]
    Llm(#[from] LlmError),
}

/// Summarizer over any chat model; holds no per-request state.
pub struct TranscriptSummarizer {
    model: Arc<dyn ChatModel + Send + Sync>,
    temperature: f32,
    empty_policy: EmptySummaryPolicy,
}

impl TranscriptSummarizer {
    pub fn new(model: Arc<dyn ChatModel + Send + Sync>) -> Self {
        Self {
            model,
            temperature: DEFAULT_TEMPERATURE,
            empty_policy: EmptySummaryPolicy::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_empty_policy(mut self, policy: EmptySummaryPolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// System prompt followed by the instruction and transcript as one user turn.
    pub fn build_messages(req: &SummaryRequest) -> Vec<Message> {
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(format!(
                "Instruction: {}\n\nTranscript:\n{}",
                req.instruction, req.transcript
            )),
        ]
    }

    /// Validates the request, then calls the model once. No retries.
    pub async fn summarize(&self, req: &SummaryRequest) -> Result<String, SummarizeError> {
        req.validate()?;
        let chat = ChatRequest {
            messages: Self::build_messages(req),
            temperature: Some(self.temperature),
        };
        match self.model.complete(&chat).await {
            Ok(summary) => Ok(summary),
            Err(LlmError::EmptyCompletion) if self.empty_policy == EmptySummaryPolicy::Placeholder => {
                tracing::warn!(
                    transcript_chars = req.transcript.len(),
                    "provider returned no summary content; answering with placeholder"
                );
                Ok(PLACEHOLDER_SUMMARY.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_llm::MockChatModel;

    #[tokio::test]
    async fn returns_model_text_verbatim() {
        let model = Arc::new(MockChatModel::replying("## Decisions\n- Ship Friday"));
        let summarizer = TranscriptSummarizer::new(model.clone());
        let out = summarizer
            .summarize(&SummaryRequest::new("Bob: ship Friday?", "Bullet the decisions"))
            .await
            .unwrap();
        assert_eq!(out, "## Decisions\n- Ship Friday");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_instruction_transcript_and_temperature() {
        let model = Arc::new(MockChatModel::replying("ok"));
        let summarizer = TranscriptSummarizer::new(model.clone()).with_temperature(0.1);
        summarizer
            .summarize(&SummaryRequest::new("Ann: hello", "One line"))
            .await
            .unwrap();

        let reqs = model.requests();
        assert_eq!(reqs.len(), 1);
        let chat = &reqs[0];
        assert_eq!(chat.temperature, Some(0.1));
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0], Message::system(SYSTEM_PROMPT));
        assert_eq!(
            chat.messages[1].content,
            "Instruction: One line\n\nTranscript:\nAnn: hello"
        );
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_model() {
        let model = Arc::new(MockChatModel::replying("unused"));
        let summarizer = TranscriptSummarizer::new(model.clone());
        let err = summarizer
            .summarize(&SummaryRequest::new("", "bullets"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SummarizeError::Invalid(ValidationError::MissingTranscriptOrInstruction)
        ));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn empty_completion_follows_policy() {
        let req = SummaryRequest::new("x", "y");

        let placeholder = TranscriptSummarizer::new(Arc::new(MockChatModel::empty()));
        assert_eq!(placeholder.summarize(&req).await.unwrap(), PLACEHOLDER_SUMMARY);

        let strict = TranscriptSummarizer::new(Arc::new(MockChatModel::empty()))
            .with_empty_policy(EmptySummaryPolicy::Error);
        assert!(matches!(
            strict.summarize(&req).await.unwrap_err(),
            SummarizeError::Llm(LlmError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn provider_failure_is_propagated() {
        let summarizer = TranscriptSummarizer::new(Arc::new(MockChatModel::failing("boom")));
        let err = summarizer
            .summarize(&SummaryRequest::new("x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeError::Llm(LlmError::Api { .. })));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Placeholder".parse::<EmptySummaryPolicy>(), Ok(EmptySummaryPolicy::Placeholder));
        assert_eq!(" error ".parse::<EmptySummaryPolicy>(), Ok(EmptySummaryPolicy::Error));
        assert!("ignore".parse::<EmptySummaryPolicy>().is_err());
    }
}
