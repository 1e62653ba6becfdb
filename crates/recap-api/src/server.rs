//! Axum server and routes.

use crate::config::Config;
use crate::error::{ApiError, MAIL_DISABLED, SUMMARY_FAILED};
use crate::ui;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use recap_core::{Dispatcher, SummarizeError, TranscriptSummarizer};
use recap_llm::OpenAiChatClient;
use recap_mail::EmailJsMailer;
use recap_types::{EmailRequest, SendEmailResponse, SummaryRequest, SummaryResponse};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub summarizer: TranscriptSummarizer,
    /// `None` when no email relay is configured.
    pub dispatcher: Option<Dispatcher>,
}

impl AppState {
    /// Wire the real provider clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let model = OpenAiChatClient::new(config.chat.clone())?;
        tracing::info!(model = %model.model(), "chat model configured");
        let summarizer = TranscriptSummarizer::new(Arc::new(model))
            .with_temperature(config.temperature)
            .with_empty_policy(config.empty_policy);

        let dispatcher = match &config.emailjs {
            Some(settings) => {
                let mailer = EmailJsMailer::new(settings.clone())?;
                Some(Dispatcher::new(Arc::new(mailer), config.sender.clone()))
            }
            None => {
                tracing::warn!("EmailJS is not configured; /api/send-email will answer 503");
                None
            }
        };

        Ok(Self {
            summarizer,
            dispatcher,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/summarize", post(handle_summarize))
        .route("/api/send-email", post(handle_send_email))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_summarize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(req) = payload?;
    match state.summarizer.summarize(&req).await {
        Ok(summary) => Ok(Json(SummaryResponse { summary })),
        Err(SummarizeError::Invalid(e)) => Err(e.into()),
        Err(SummarizeError::Llm(e)) => {
            tracing::error!(error = %e, "summarize error");
            Err(ApiError::Upstream(SUMMARY_FAILED))
        }
    }
}

async fn handle_send_email(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or(ApiError::Unavailable(MAIL_DISABLED))?;

    let report = dispatcher.dispatch(&req).await?;
    if !report.all_succeeded() {
        let failed = report.failed();
        tracing::error!(
            dispatch_id = %report.dispatch_id,
            failed = failed.len(),
            total = report.results.len(),
            "send email error"
        );
        return Err(ApiError::Delivery(failed));
    }
    Ok(Json(SendEmailResponse { ok: true }))
}

async fn handle_health() -> &'static str {
    "ok"
}
