//! Mock mailer for tests: no network, configurable per-recipient failures.

use recap_types::{Mailer, MailerError, OutgoingEmail};
use std::collections::HashSet;
use std::sync::Mutex;

/// Mailer that accepts every email except those addressed to a failing recipient.
/// Every attempted email is recorded, including failed ones.
pub struct MockMailer {
    failing: HashSet<String>,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Sends to `recipient` fail with a relay rejection.
    pub fn failing_for(mut self, recipient: impl Into<String>) -> Self {
        self.failing.insert(recipient.into());
        self
    }

    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(email.clone());
        }
        if self.failing.contains(&email.to_email) {
            return Err(MailerError::Api {
                status: 422,
                body: format!("rejected {}", email.to_email),
            });
        }
        Ok("OK".to_string())
    }
}
