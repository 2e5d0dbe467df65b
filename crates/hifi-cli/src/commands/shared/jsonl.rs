//! Line-delimited JSON import files.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// One parsed line of an import file. `line` is 1-based.
pub struct Record<T> {
    pub line: usize,
    pub value: Result<T, String>,
}

/// Read every line of `path` as `T`, keeping going past malformed lines.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<Record<T>>> {
    let lines = serde_jsonlines::json_lines::<serde_json::Value, _>(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let value = line
            .map_err(|e| e.to_string())
            .and_then(|v| serde_json::from_value::<T>(v).map_err(|e| e.to_string()));
        records.push(Record {
            line: idx + 1,
            value,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use hifi_core::entities::NewComponent;

    use super::*;

    #[test]
    fn keeps_good_lines_and_reports_bad_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"brand":"Sennheiser","name":"HD 600","category":"headphones","price_new":399}}"#
        )
        .unwrap();
        writeln!(file, r#"{{"brand":"Schiit","category":"amp"}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(
            file,
            r#"{{"brand":"Moondrop","name":"Aria","category":"iem","price_new":80}}"#
        )
        .unwrap();

        let records = read_records::<NewComponent>(file.path()).unwrap();
        assert_eq!(records.len(), 4);
        assert!(records[0].value.is_ok());
        assert!(records[1].value.as_ref().unwrap_err().contains("name"));
        assert!(records[2].value.is_err());
        assert_eq!(records[3].line, 4);
        assert_eq!(records[3].value.as_ref().unwrap().name, "Aria");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_records::<NewComponent>(&dir.path().join("absent.jsonl")).is_err());
    }
}
