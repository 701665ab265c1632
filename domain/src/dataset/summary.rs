//! Compact dataset summaries for prompts.
//!
//! Only column names and a short preview ever reach the reasoning service;
//! the full dataset stays in the execution context.

use crate::agent::ContextMap;
use crate::core::string::truncate;
use crate::mode::{DATASET_ID_KEY, DATASET_KEY};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of preview rows embedded in a prompt.
pub const PREVIEW_ROWS: usize = 2;

const MAX_CELL_CHARS: usize = 80;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    pub row_count: usize,
    /// Column names in first-seen order.
    pub columns: Vec<String>,
    pub preview: Vec<Value>,
}

impl DatasetSummary {
    /// Summarize a dataset given as a JSON array of records.
    ///
    /// Non-array values yield an empty summary; non-object rows contribute
    /// no columns.
    pub fn from_records(records: &Value) -> Self {
        let rows = records.as_array().map(Vec::as_slice).unwrap_or_default();

        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            if let Some(object) = row.as_object() {
                for key in object.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
        }

        Self {
            dataset_id: None,
            row_count: rows.len(),
            columns,
            preview: rows.iter().take(PREVIEW_ROWS).map(shorten_row).collect(),
        }
    }

    /// Summarize whatever dataset the context carries, if any.
    pub fn from_context(context: &ContextMap) -> Option<Self> {
        let dataset_id = context.get(DATASET_ID_KEY).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });

        match context.get(DATASET_KEY) {
            Some(records) => {
                let mut summary = Self::from_records(records);
                summary.dataset_id = dataset_id;
                Some(summary)
            }
            None => dataset_id.map(|id| Self {
                dataset_id: Some(id),
                ..Default::default()
            }),
        }
    }

    /// Render as prompt text.
    pub fn to_prompt_text(&self) -> String {
        let mut text = String::new();
        if let Some(id) = &self.dataset_id {
            text.push_str(&format!("Dataset ID: {}\n", id));
        }
        if self.columns.is_empty() && self.row_count == 0 {
            text.push_str("Dataset contents not loaded.\n");
            return text;
        }
        text.push_str(&format!("Rows: {}\n", self.row_count));
        text.push_str(&format!("Columns: {}\n", self.columns.join(", ")));
        if !self.preview.is_empty() {
            text.push_str("Preview:\n");
            for row in &self.preview {
                text.push_str(&format!("  {}\n", row));
            }
        }
        text
    }
}

fn shorten_row(row: &Value) -> Value {
    match row {
        Value::Object(object) => Value::Object(
            object
                .iter()
                .map(|(k, v)| (k.clone(), shorten_cell(v)))
                .collect(),
        ),
        other => shorten_cell(other),
    }
}

fn shorten_cell(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(truncate(s, MAX_CELL_CHARS)),
        Value::Array(_) | Value::Object(_) => {
            Value::String(truncate(&value.to_string(), MAX_CELL_CHARS))
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_is_capped() {
        let records = json!([
            {"date": "2024-03-01", "sales": 10},
            {"date": "2024-03-02", "sales": 12, "region": "north"},
            {"date": "2024-03-03", "sales": 9},
        ]);
        let summary = DatasetSummary::from_records(&records);
        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.columns, vec!["date", "sales", "region"]);
        assert_eq!(summary.preview.len(), PREVIEW_ROWS);

        let text = summary.to_prompt_text();
        assert!(text.contains("Columns: date, sales, region"));
        assert!(!text.contains("2024-03-03"));
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let long = "x".repeat(500);
        let summary = DatasetSummary::from_records(&json!([{ "notes": long }]));
        let cell = summary.preview[0]["notes"].as_str().unwrap();
        assert!(cell.len() <= MAX_CELL_CHARS);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn test_from_context() {
        let mut ctx = ContextMap::new();
        assert!(DatasetSummary::from_context(&ctx).is_none());

        ctx.insert(DATASET_ID_KEY.to_string(), json!("march"));
        let summary = DatasetSummary::from_context(&ctx).unwrap();
        assert_eq!(summary.dataset_id.as_deref(), Some("march"));
        assert!(summary.to_prompt_text().contains("not loaded"));

        ctx.insert(DATASET_KEY.to_string(), json!([{"sku": "A1"}]));
        let summary = DatasetSummary::from_context(&ctx).unwrap();
        assert_eq!(summary.columns, vec!["sku"]);
    }

    #[test]
    fn test_non_array_dataset() {
        let summary = DatasetSummary::from_records(&json!("not rows"));
        assert_eq!(summary.row_count, 0);
        assert!(summary.columns.is_empty());
    }
}
