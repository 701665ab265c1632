//! Mode detection.
//!
//! Classifies a query into an [`OperatingMode`] from signals available
//! before any agent runs. Rules are evaluated in order and the first match
//! wins:
//!
//! 1. No `dataset_id` / `dataset` in context → [`OperatingMode::ColdStart`]
//! 2. Query mentions a deep-analysis or transactional keyword → [`OperatingMode::DeepDive`]
//! 3. Otherwise → [`OperatingMode::AdHoc`]

use super::operating_mode::OperatingMode;
use crate::agent::ContextMap;
use serde::{Deserialize, Serialize};

/// Context keys that signal an attached dataset.
pub const DATASET_ID_KEY: &str = "dataset_id";
pub const DATASET_KEY: &str = "dataset";

pub const DEFAULT_DEEP_KEYWORDS: &[&str] = &[
    "optimize",
    "full analysis",
    "deep dive",
    "strategy",
    "forecast",
    "predict",
    "bullwhip",
    "inventory",
];

pub const DEFAULT_ORDER_KEYWORDS: &[&str] = &["order", "buy", "purchase", "procure"];

/// Whether the context carries any indication of an attached dataset.
pub fn has_dataset(context: &ContextMap) -> bool {
    context.contains_key(DATASET_ID_KEY) || context.contains_key(DATASET_KEY)
}

/// Keyword-driven mode detector.
///
/// Keywords are matched as lower-cased substrings of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDetector {
    /// Keywords signalling deep analytical intent.
    pub deep_keywords: Vec<String>,
    /// Keywords signalling transactional intent.
    pub order_keywords: Vec<String>,
}

impl Default for ModeDetector {
    fn default() -> Self {
        Self {
            deep_keywords: DEFAULT_DEEP_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            order_keywords: DEFAULT_ORDER_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ModeDetector {
    pub fn with_deep_keywords(mut self, keywords: Vec<String>) -> Self {
        self.deep_keywords = keywords;
        self
    }

    pub fn with_order_keywords(mut self, keywords: Vec<String>) -> Self {
        self.order_keywords = keywords;
        self
    }

    /// Detect the operating mode for a query.
    pub fn detect(&self, query: &str, context: &ContextMap) -> OperatingMode {
        if !has_dataset(context) {
            return OperatingMode::ColdStart;
        }

        let query = query.to_lowercase();
        if Self::mentions_any(&query, &self.deep_keywords)
            || Self::mentions_any(&query, &self.order_keywords)
        {
            return OperatingMode::DeepDive;
        }

        OperatingMode::AdHoc
    }

    fn mentions_any(query: &str, keywords: &[String]) -> bool {
        keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .any(|k| !k.is_empty() && query.contains(&k))
    }
}
