//! Recap orchestration: summarize a transcript through a chat model, fan a summary out to recipients.

mod dispatch;
mod summarizer;

pub use dispatch::{DispatchReport, Dispatcher};
pub use summarizer::{
    EmptySummaryPolicy, SummarizeError, TranscriptSummarizer, DEFAULT_TEMPERATURE,
    PLACEHOLDER_SUMMARY, SYSTEM_PROMPT,
};
