//! Recap HTTP service: summarize transcripts and mail the result.

pub mod config;
pub mod error;
pub mod server;
mod ui;
