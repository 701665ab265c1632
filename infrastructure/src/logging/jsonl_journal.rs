//! JSONL run journal.
//!
//! Each [`JournalEvent`] becomes one JSON line carrying `type`,
//! `request_id` and `recorded_at` next to the event payload. Payload fields
//! keep their own names, so an agent result's `timestamp` survives. Runs
//! append to the same file.

use aura_application::{JournalEvent, RunJournal};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlRunJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRunJournal {
    /// Open (or create) the journal at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened; the run proceeds
    /// without a journal.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create journal directory {}: {}", parent.display(), e);
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open journal {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn to_record(event: JournalEvent, recorded_at: String) -> Value {
    match event.payload {
        Value::Object(mut map) => {
            map.insert("type".to_string(), Value::String(event.event_type.to_string()));
            map.insert("request_id".to_string(), Value::String(event.request_id));
            map.insert("recorded_at".to_string(), Value::String(recorded_at));
            Value::Object(map)
        }
        other => json!({
            "type": event.event_type,
            "request_id": event.request_id,
            "recorded_at": recorded_at,
            "data": other,
        }),
    }
}

impl RunJournal for JsonlRunJournal {
    fn record(&self, event: JournalEvent) {
        let recorded_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, recorded_at)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlRunJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_domain::AgentResult;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("journal.jsonl");
        let journal = JsonlRunJournal::open(&path).unwrap();

        journal.record(JournalEvent::new(
            "mode_detected",
            "req-1",
            json!({"mode": "cold_start"}),
        ));
        journal.record(JournalEvent::new(
            "agent_result",
            "req-1",
            json!({"agent": "trend_analyst", "success": true}),
        ));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "mode_detected");
        assert_eq!(lines[0]["mode"], "cold_start");
        assert_eq!(lines[1]["request_id"], "req-1");
        assert!(lines[1]["recorded_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");

        for id in ["a", "b"] {
            let journal = JsonlRunJournal::open(&path).unwrap();
            journal.record(JournalEvent::new("query_completed", id, json!({})));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["request_id"], "b");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let record = to_record(
            JournalEvent::new("step_skipped", "r", json!(["x"])),
            "t".to_string(),
        );
        assert_eq!(record["data"], json!(["x"]));
        assert_eq!(record["type"], "step_skipped");
    }

    #[test]
    fn test_agent_result_timestamp_is_preserved() {
        let mut result = AgentResult::success("forecaster", json!({"periods": 30}));
        result.timestamp = Some("2025-12-31T23:59:59.000Z".to_string());
        let record = to_record(
            JournalEvent::new("agent_result", "r", json!(result)),
            "2026-01-01T00:00:00.000Z".to_string(),
        );
        assert_eq!(record["timestamp"], "2025-12-31T23:59:59.000Z");
        assert_eq!(record["recorded_at"], "2026-01-01T00:00:00.000Z");
        assert_eq!(record["agent_name"], "forecaster");
    }
}
