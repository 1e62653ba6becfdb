//! Dispatcher: sends one summary to many recipients concurrently and joins the outcomes.

use futures::future::join_all;
use recap_types::{EmailRequest, EmailResult, Mailer, OutgoingEmail, Sender, ValidationError};
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a dispatch: one result per recipient, in request order.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub dispatch_id: String,
    pub results: Vec<EmailResult>,
}

impl DispatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn failed(&self) -> Vec<EmailResult> {
        self.results.iter().filter(|r| !r.success).cloned().collect()
    }

    pub fn sent_count(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

pub struct Dispatcher {
    mailer: Arc<dyn Mailer + Send + Sync>,
    default_sender: Sender,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer + Send + Sync>, default_sender: Sender) -> Self {
        Self {
            mailer,
            default_sender,
        }
    }

    /// Request sender fields win over the configured default when non-blank.
    fn resolve_sender(&self, req: &EmailRequest) -> Sender {
        Sender {
            email: non_blank_or(req.from_email.as_deref(), &self.default_sender.email),
            name: non_blank_or(req.from_name.as_deref(), &self.default_sender.name),
        }
    }

    /// Validates, then issues every send at once. A failed recipient does not stop the others.
    pub async fn dispatch(&self, req: &EmailRequest) -> Result<DispatchReport, ValidationError> {
        req.validate()?;
        let recipients = req.recipients();
        let sender = self.resolve_sender(req);
        let subject = req.subject_or_default();
        let dispatch_id = Uuid::new_v4().to_string();

        let emails: Vec<OutgoingEmail> = recipients
            .iter()
            .map(|to| OutgoingEmail {
                to_email: to.clone(),
                from_email: sender.email.clone(),
                from_name: sender.name.clone(),
                subject: subject.to_string(),
                message: req.body.clone(),
            })
            .collect();

        let sends = emails.iter().map(|email| async move {
            match self.mailer.send(email).await {
                Ok(detail) => EmailResult {
                    recipient: email.to_email.clone(),
                    success: true,
                    detail,
                },
                Err(e) => {
                    tracing::warn!(recipient = %email.to_email, error = %e, "email send failed");
                    EmailResult {
                        recipient: email.to_email.clone(),
                        success: false,
                        detail: e.to_string(),
                    }
                }
            }
        });
        let results = join_all(sends).await;

        let report = DispatchReport {
            dispatch_id,
            results,
        };
        tracing::info!(
            dispatch_id = %report.dispatch_id,
            recipients = report.results.len(),
            sent = report.sent_count(),
            "dispatch finished"
        );
        Ok(report)
    }
}

fn non_blank_or(given: Option<&str>, fallback: &str) -> String {
    match given.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_mail::MockMailer;
    use recap_types::MailerError;
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn request(to: &[&str]) -> EmailRequest {
        EmailRequest {
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: "Weekly sync".to_string(),
            body: "- shipped".to_string(),
            from_email: None,
            from_name: None,
        }
    }

    fn default_sender() -> Sender {
        Sender {
            email: "noreply@recap.local".to_string(),
            name: "Recap".to_string(),
        }
    }

    #[tokio::test]
    async fn one_failure_is_reported_and_others_still_sent() {
        let mailer = Arc::new(MockMailer::new().failing_for("b@x.com"));
        let dispatcher = Dispatcher::new(mailer.clone(), default_sender());
        let report = dispatcher
            .dispatch(&request(&["a@x.com", "b@x.com"]))
            .await
            .unwrap();

        assert!(!report.all_succeeded());
        assert_eq!(report.sent_count(), 1);
        let failed = report.failed();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].recipient, "b@x.com");
        assert!(!failed[0].success);
        assert!(failed[0].detail.contains("rejected b@x.com"));

        let mut attempted: Vec<String> = mailer.attempts().into_iter().map(|e| e.to_email).collect();
        attempted.sort();
        assert_eq!(attempted, vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn results_keep_request_order_and_provider_detail() {
        let mailer = Arc::new(MockMailer::new());
        let dispatcher = Dispatcher::new(mailer, default_sender());
        let report = dispatcher
            .dispatch(&request(&["c@x.com", " ", "a@x.com"]))
            .await
            .unwrap();
        assert!(report.all_succeeded());
        let order: Vec<&str> = report.results.iter().map(|r| r.recipient.as_str()).collect();
        assert_eq!(order, vec!["c@x.com", "a@x.com"]);
        assert!(report.results.iter().all(|r| r.detail == "OK"));
    }

    #[tokio::test]
    async fn empty_recipients_never_reach_mailer() {
        let mailer = Arc::new(MockMailer::new());
        let dispatcher = Dispatcher::new(mailer.clone(), default_sender());
        let err = dispatcher.dispatch(&request(&[])).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingRecipients);

        let mut empty_body = request(&["a@x.com"]);
        empty_body.body = "  ".to_string();
        let err = dispatcher.dispatch(&empty_body).await.unwrap_err();
        assert_eq!(err, ValidationError::EmptyBody);
        assert_eq!(mailer.calls(), 0);
    }

    #[tokio::test]
    async fn sender_and_subject_resolution() {
        let mailer = Arc::new(MockMailer::new());
        let dispatcher = Dispatcher::new(mailer.clone(), default_sender());

        let mut req = request(&["a@x.com"]);
        req.subject = String::new();
        req.from_email = Some("dana@corp.com".to_string());
        req.from_name = Some("  ".to_string());
        dispatcher.dispatch(&req).await.unwrap();

        let sent = mailer.attempts();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from_email, "dana@corp.com");
        assert_eq!(sent[0].from_name, "Recap");
        assert_eq!(sent[0].subject, recap_types::DEFAULT_SUBJECT);
        assert_eq!(sent[0].message, "- shipped");
    }

    /// Holds every send until all of them are in flight together.
    struct RendezvousMailer {
        barrier: Barrier,
    }

    #[async_trait::async_trait]
    impl Mailer for RendezvousMailer {
        async fn send(&self, _email: &OutgoingEmail) -> Result<String, MailerError> {
            self.barrier.wait().await;
            Ok("OK".to_string())
        }
    }

    #[tokio::test]
    async fn sends_are_issued_concurrently() {
        let mailer = Arc::new(RendezvousMailer {
            barrier: Barrier::new(3),
        });
        let dispatcher = Dispatcher::new(mailer, default_sender());
        let report = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher.dispatch(&request(&["a@x.com", "b@x.com", "c@x.com"])),
        )
        .await
        .expect("sends were serialized");
        assert!(report.unwrap().all_succeeded());
    }
}
