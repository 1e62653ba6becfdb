//! Request and response DTOs for the summarize and send-email endpoints.

use crate::{normalize_recipients, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};

/// Subject used when a send-email request leaves it blank.
pub const DEFAULT_SUBJECT: &str = "Meeting Summary";

/// Single chat message (system/user/assistant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One chat-completion call. The model id is fixed by the client configuration.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
}

/// Missing and `null` both decode as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Summarize request body.
///
/// Missing or `null` fields decode as empty strings so they surface as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub transcript: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instruction: String,
}

impl SummaryRequest {
    pub fn new(transcript: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            instruction: instruction.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.transcript.trim().is_empty() || self.instruction.trim().is_empty() {
            return Err(ValidationError::MissingTranscriptOrInstruction);
        }
        Ok(())
    }
}

/// Successful summarize response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Send-email request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
}

impl EmailRequest {
    /// Recipients with blanks removed, in request order.
    pub fn recipients(&self) -> Vec<String> {
        normalize_recipients(&self.to)
    }

    /// Subject, or [`DEFAULT_SUBJECT`] when blank.
    pub fn subject_or_default(&self) -> &str {
        let s = self.subject.trim();
        if s.is_empty() {
            DEFAULT_SUBJECT
        } else {
            s
        }
    }

    /// Recipients are checked before the body.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.recipients().is_empty() {
            return Err(ValidationError::MissingRecipients);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(())
    }
}

/// Who a dispatched email appears to come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

/// A single email handed to a [`crate::Mailer`]: one recipient, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to_email: String,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    pub message: String,
}

/// Outcome of one send within a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResult {
    pub recipient: String,
    pub success: bool,
    /// Provider response text on success, error text on failure.
    pub detail: String,
}

/// Successful send-email response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub ok: bool,
}

/// Error body shared by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<EmailResult>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_request_missing_fields_decode_as_empty() {
        let req: SummaryRequest = serde_json::from_str(r#"{"transcript":"hello"}"#).unwrap();
        assert_eq!(req.transcript, "hello");
        assert_eq!(req.instruction, "");
        assert_eq!(
            req.validate(),
            Err(ValidationError::MissingTranscriptOrInstruction)
        );
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let req: SummaryRequest =
            serde_json::from_str(r#"{"transcript":null,"instruction":"y"}"#).unwrap();
        assert_eq!(req.transcript, "");
        assert_eq!(
            req.validate(),
            Err(ValidationError::MissingTranscriptOrInstruction)
        );

        let req: EmailRequest =
            serde_json::from_str(r#"{"to":null,"subject":null,"body":"b"}"#).unwrap();
        assert!(req.to.is_empty());
        assert_eq!(req.subject_or_default(), DEFAULT_SUBJECT);
        assert_eq!(req.validate(), Err(ValidationError::MissingRecipients));
    }

    #[test]
    fn summary_request_rejects_whitespace_only() {
        let req = SummaryRequest::new("   \n", "bullets");
        assert!(req.validate().is_err());
        let req = SummaryRequest::new("Alice: hi", "bullets");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn email_request_checks_recipients_before_body() {
        let req = EmailRequest {
            to: vec![" ".to_string()],
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ValidationError::MissingRecipients));

        let req = EmailRequest {
            to: vec!["a@x.com".to_string()],
            body: "".to_string(),
            ..Default::default()
        };
        assert_eq!(req.validate(), Err(ValidationError::EmptyBody));
    }

    #[test]
    fn blank_subject_falls_back_to_default() {
        let mut req = EmailRequest::default();
        assert_eq!(req.subject_or_default(), DEFAULT_SUBJECT);
        req.subject = "  Weekly sync ".to_string();
        assert_eq!(req.subject_or_default(), "Weekly sync");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "nope" }));
    }
}
