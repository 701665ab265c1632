//! Local dataset loader
//!
//! Reads a dataset from disk and injects it into a query context as
//! `dataset` (plus `dataset_id`), the same shape an upload would produce.
//!
//! Accepted layouts:
//!
//! - a top-level JSON array of records: `[{"sku": "A", "qty": 3}, ...]`
//! - a stored JSON dataset document: `{"dataset_id": "..", "data": [...]}`
//! - a `.csv` file with a header row; each row becomes one record

use aura_domain::{ContextMap, DATASET_ID_KEY, DATASET_KEY};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset {path} is not valid CSV: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset {0} must be an array of records or an object with a \"data\" array")]
    NotRecords(PathBuf),
}

/// A dataset read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub dataset_id: String,
    pub records: Vec<Value>,
}

impl LoadedDataset {
    /// Merge into a request context.
    ///
    /// Keys already present in `context` win, so an explicit `dataset_id`
    /// from the caller is never replaced by the file stem.
    pub fn merge_into(self, context: &mut ContextMap) {
        context
            .entry(DATASET_ID_KEY.to_string())
            .or_insert(Value::String(self.dataset_id));
        context
            .entry(DATASET_KEY.to_string())
            .or_insert(Value::Array(self.records));
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalDatasetLoader;

impl LocalDatasetLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and validate a dataset file. Files ending in `.csv` are read as
    /// CSV, everything else as JSON.
    pub fn load(&self, path: &Path) -> Result<LoadedDataset, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("dataset")
            .to_string();

        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

        let (dataset_id, records) = if is_csv {
            (stem, parse_csv(path, &content)?)
        } else {
            parse_json(path, &content, stem)?
        };

        info!(
            "Loaded dataset {} ({} rows) from {}",
            dataset_id,
            records.len(),
            path.display()
        );
        debug!("First record: {:?}", records.first());

        Ok(LoadedDataset { dataset_id, records })
    }

    /// Load `path` and merge it into `context`.
    pub fn load_into(&self, path: &Path, context: &mut ContextMap) -> Result<(), DatasetError> {
        self.load(path)?.merge_into(context);
        Ok(())
    }
}

fn parse_json(path: &Path, content: &str, stem: String) -> Result<(String, Vec<Value>), DatasetError> {
    let value: Value = serde_json::from_str(content).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let (dataset_id, records) = match value {
        Value::Array(records) => (stem, records),
        Value::Object(mut doc) => match doc.remove("data") {
            Some(Value::Array(records)) => {
                let id = doc
                    .get(DATASET_ID_KEY)
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(stem);
                (id, records)
            }
            _ => return Err(DatasetError::NotRecords(path.to_path_buf())),
        },
        _ => return Err(DatasetError::NotRecords(path.to_path_buf())),
    };

    if !records.iter().all(Value::is_object) {
        return Err(DatasetError::NotRecords(path.to_path_buf()));
    }
    Ok((dataset_id, records))
}

fn parse_csv(path: &Path, content: &str) -> Result<Vec<Value>, DatasetError> {
    let csv_error = |source: csv::Error| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    reader
        .records()
        .map(|row| -> Result<Value, DatasetError> {
            let row = row.map_err(csv_error)?;
            let record: Map<String, Value> = headers
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.to_string(), cell_value(cell)))
                .collect();
            Ok(Value::Object(record))
        })
        .collect()
}

/// Type a CSV cell: empty is null, then integer, float, bool, else string.
fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = cell.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    match cell {
        "true" | "TRUE" | "True" => Value::Bool(true),
        "false" | "FALSE" | "False" => Value::Bool(false),
        _ => Value::String(cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_record_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "sales_q3.json", r#"[{"sku": "A", "qty": 3}, {"sku": "B", "qty": 5}]"#);

        let mut context = ContextMap::new();
        LocalDatasetLoader::new().load_into(&path, &mut context).unwrap();

        assert_eq!(context[DATASET_ID_KEY], "sales_q3");
        assert_eq!(context[DATASET_KEY].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_load_stored_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "export.json",
            r#"{"dataset_id": "7f3c", "rows": 1, "data": [{"sku": "A"}]}"#,
        );
        let loaded = LocalDatasetLoader::new().load(&path).unwrap();
        assert_eq!(loaded.dataset_id, "7f3c");
        assert_eq!(loaded.records, vec![json!({"sku": "A"})]);
    }

    #[test]
    fn test_request_context_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "inventory.json", r#"[{"sku": "A"}]"#);

        let mut context = ContextMap::new();
        context.insert(DATASET_ID_KEY.to_string(), json!("explicit"));
        LocalDatasetLoader::new().load_into(&path, &mut context).unwrap();

        assert_eq!(context[DATASET_ID_KEY], "explicit");
        assert!(context.contains_key(DATASET_KEY));
    }

    #[test]
    fn test_rejects_non_records() {
        let dir = tempfile::tempdir().unwrap();
        let loader = LocalDatasetLoader::new();

        let scalar = write(&dir, "scalar.json", "42");
        assert!(matches!(loader.load(&scalar), Err(DatasetError::NotRecords(_))));

        let mixed = write(&dir, "mixed.json", r#"[{"a": 1}, 2]"#);
        assert!(matches!(loader.load(&mixed), Err(DatasetError::NotRecords(_))));

        let broken = write(&dir, "broken.json", "[{");
        assert!(matches!(loader.load(&broken), Err(DatasetError::Json { .. })));

        assert!(matches!(
            loader.load(&dir.path().join("missing.json")),
            Err(DatasetError::Io { .. })
        ));
    }

    #[test]
    fn test_load_csv_with_typed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "stock_levels.CSV",
            "sku, qty, price, discontinued, note\nA, 3, 9.5, false,\nB, 12, 4, true, reorder soon\n",
        );

        let mut context = ContextMap::new();
        LocalDatasetLoader::new().load_into(&path, &mut context).unwrap();

        assert_eq!(context[DATASET_ID_KEY], "stock_levels");
        assert_eq!(
            context[DATASET_KEY],
            json!([
                {"sku": "A", "qty": 3, "price": 9.5, "discontinued": false, "note": null},
                {"sku": "B", "qty": 12, "price": 4, "discontinued": true, "note": "reorder soon"}
            ])
        );
    }

    #[test]
    fn test_rejects_ragged_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "ragged.csv", "sku,qty\nA,1\nB,2,extra\n");
        assert!(matches!(
            LocalDatasetLoader::new().load(&path),
            Err(DatasetError::Csv { .. })
        ));
    }
}
