//! Reasoning service decorators.

mod fallback;

pub use fallback::{FALLBACK_TEXT, FallbackReasoningService};
