//! Reads the pump dataset from a JSON file.
//!
//! The dataset is a JSON array of record objects. It is read once at startup;
//! a missing or malformed file is reported and yields an empty collection
//! instead of an error, so the table simply shows zero rows.
//!
//! Elements are decoded one by one. An element that is not an object, or has
//! no usable `id`, is skipped with a warning and the rest still load.

use crate::error::{PumpzError, Result};
use crate::model::Record;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the dataset, propagating any failure.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading dataset");
    let content = fs::read_to_string(path).map_err(PumpzError::Io)?;
    let values: Vec<Value> = serde_json::from_str(&content).map_err(PumpzError::Serialization)?;

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Record>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "skipping unusable record");
                None
            }
        })
        .collect();
    Ok(records)
}

/// Read the dataset, falling back to an empty collection on failure.
///
/// The failure is logged once here and not retried.
pub fn load_dataset_or_empty<P: AsRef<Path>>(path: P) -> Vec<Record> {
    let path = path.as_ref();
    match read_dataset(path) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load dataset, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordId;

    #[test]
    fn reads_valid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pumps_data.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Main Pump"}, {"id": 2, "name": "Backup Pump"}]"#,
        )
        .unwrap();

        let records = read_dataset(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, RecordId::Int(2));
    }

    #[test]
    fn bad_records_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.json");
        fs::write(
            &path,
            r#"[
                {"id": 1, "name": "Main Pump"},
                {"name": "No Id Pump"},
                {"id": null, "name": "Null Id Pump"},
                {"id": true},
                "not a record",
                {"id": 2.0, "name": "Float Id Pump"},
                {"id": 2.5, "name": "Fractional Id Pump"}
            ]"#,
        )
        .unwrap();

        let records = load_dataset_or_empty(&path);
        let ids: Vec<RecordId> = records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                RecordId::Int(1),
                RecordId::Int(2),
                RecordId::Text("2.5".into())
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error_for_read() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_dataset(dir.path().join("nope.json"));
        assert!(matches!(result, Err(PumpzError::Io(_))));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dataset_or_empty(dir.path().join("nope.json")).is_empty());
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_dataset_or_empty(&path).is_empty());
    }
}
