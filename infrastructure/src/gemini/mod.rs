//! Gemini reasoning service adapter.

mod client;
mod error;

pub use client::{GeminiConfig, GeminiReasoningService};
pub use error::GeminiError;
