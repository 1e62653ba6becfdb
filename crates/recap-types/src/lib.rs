//! Core types and traits for the Recap transcript summarizer.
//!
//! Request/response DTOs mirror the JSON bodies of `/api/summarize` and `/api/send-email`.

mod dto;
mod recipients;
mod traits;

pub use dto::*;
pub use recipients::normalize_recipients;
pub use traits::*;
