//! Service configuration, read once from the environment at startup.

use recap_core::{EmptySummaryPolicy, DEFAULT_TEMPERATURE};
use recap_llm::ChatSettings;
use recap_mail::EmailJsSettings;
use recap_types::Sender;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_SENDER_NAME: &str = "Recap";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub chat: ChatSettings,
    pub temperature: f32,
    pub empty_policy: EmptySummaryPolicy,
    /// `None` when the relay is not configured; send-email then answers 503.
    pub emailjs: Option<EmailJsSettings>,
    pub sender: Sender,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen: SocketAddr = parse_or(&get, "RECAP_LISTEN", DEFAULT_LISTEN.parse().ok())?
            .ok_or(ConfigError::Missing("RECAP_LISTEN"))?;

        let api_key = get("LLM_API_KEY")
            .or_else(|| get("GROQ_API_KEY"))
            .ok_or(ConfigError::Missing("LLM_API_KEY"))?;
        let mut chat = ChatSettings::new(api_key);
        if let Some(url) = get("LLM_API_URL") {
            chat.api_url = url;
        }
        if let Some(model) = get("LLM_MODEL") {
            chat.model = model;
        }
        chat.timeout = parse_or::<u64, _>(&get, "LLM_TIMEOUT_SECS", None)?.map(Duration::from_secs);

        let temperature: f32 =
            parse_or(&get, "LLM_TEMPERATURE", Some(DEFAULT_TEMPERATURE))?.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                key: "LLM_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }

        let empty_policy = match get("RECAP_EMPTY_SUMMARY") {
            Some(v) => v.parse::<EmptySummaryPolicy>().map_err(|reason| ConfigError::Invalid {
                key: "RECAP_EMPTY_SUMMARY",
                value: v.clone(),
                reason,
            })?,
            None => EmptySummaryPolicy::default(),
        };

        let emailjs = match (
            get("EMAILJS_SERVICE_ID"),
            get("EMAILJS_TEMPLATE_ID"),
            get("EMAILJS_PUBLIC_KEY"),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => {
                let mut settings = EmailJsSettings::new(service_id, template_id, public_key);
                if let Some(url) = get("EMAILJS_API_URL") {
                    settings.api_url = url;
                }
                settings.private_key = get("EMAILJS_PRIVATE_KEY");
                settings.timeout =
                    parse_or::<u64, _>(&get, "EMAILJS_TIMEOUT_SECS", None)?.map(Duration::from_secs);
                Some(settings)
            }
            _ => None,
        };

        let sender = Sender {
            email: get("RECAP_SENDER_EMAIL").unwrap_or_default(),
            name: get("RECAP_SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
        };

        Ok(Self {
            listen,
            chat,
            temperature,
            empty_policy,
            emailjs,
            sender,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: Option<T>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
