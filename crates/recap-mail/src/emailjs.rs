//! EmailJS REST client.
//!
//! Posts to `/api/v1.0/email/send` with JSON body:
//!   { "service_id", "template_id", "user_id": <public key>, "accessToken"?: <private key>,
//!     "template_params": { to_email, from_email, from_name, reply_to, subject, message, title, name } }
//! A 200 response carries the plain-text body "OK".

use recap_types::{Mailer, MailerError, OutgoingEmail};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone)]
pub struct EmailJsSettings {
    pub api_url: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl EmailJsSettings {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            private_key: None,
            timeout: None,
        }
    }
}

impl fmt::Debug for EmailJsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailJsSettings")
            .field("api_url", &self.api_url)
            .field("service_id", &self.service_id)
            .field("template_id", &self.template_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    from_email: &'a str,
    from_name: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    message: &'a str,
    // Older templates reference these names.
    title: &'a str,
    name: &'a str,
}

impl<'a> TemplateParams<'a> {
    fn from_email(email: &'a OutgoingEmail) -> Self {
        Self {
            to_email: &email.to_email,
            from_email: &email.from_email,
            from_name: &email.from_name,
            reply_to: &email.from_email,
            subject: &email.subject,
            message: &email.message,
            title: &email.subject,
            name: &email.from_name,
        }
    }
}

/// Mailer that sends each email through one EmailJS service/template pair.
pub struct EmailJsMailer {
    client: reqwest::Client,
    settings: EmailJsSettings,
}

impl EmailJsMailer {
    pub fn new(settings: EmailJsSettings) -> Result<Self, MailerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MailerError::Http(e.to_string()))?;
        Ok(Self { client, settings })
    }
}

impl fmt::Debug for EmailJsMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailJsMailer")
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait::async_trait]
impl Mailer for EmailJsMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<String, MailerError> {
        let body = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            access_token: self.settings.private_key.as_deref(),
            template_params: TemplateParams::from_email(email),
        };

        let res = self
            .client
            .post(&self.settings.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::Http(e.to_string()))?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(MailerError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        tracing::debug!(to = %email.to_email, "email accepted by relay");
        Ok(text)
    }
}
