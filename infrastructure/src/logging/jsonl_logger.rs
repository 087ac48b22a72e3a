//! JSONL file writer for workflow events.
//!
//! Each [`WorkflowEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use subquery_application::ports::event_logger::{WorkflowEvent, WorkflowEventLogger};
use tracing::warn;

/// JSONL workflow event logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; every line is flushed as it is
/// written so concurrent answer tasks interleave whole lines only.
pub struct JsonlWorkflowLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlWorkflowLogger {
    /// Open (or create) the log file at `path` in append mode.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WorkflowEventLogger for JsonlWorkflowLogger {
    fn log(&self, event: WorkflowEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match event.payload {
            serde_json::Value::Object(mut map) => {
                map.insert("type".to_string(), event.event_type.into());
                map.insert("timestamp".to_string(), timestamp.into());
                serde_json::Value::Object(map)
            }
            other => serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Failed to write event log {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlWorkflowLogger::new(&path).unwrap();

        logger.log(WorkflowEvent::new(
            "attempt_failed",
            serde_json::json!({"index": 1, "attempt": 1, "error": "Timeout"}),
        ));
        logger.log(WorkflowEvent::new(
            "sub_question_exhausted",
            serde_json::json!({"index": 1}),
        ));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "attempt_failed");
        assert_eq!(lines[0]["error"], "Timeout");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["type"], "sub_question_exhausted");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlWorkflowLogger::new(&path).unwrap();

        logger.log(WorkflowEvent::new("note", serde_json::json!("plain")));

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");

        JsonlWorkflowLogger::new(&path)
            .unwrap()
            .log(WorkflowEvent::new("first", serde_json::json!({})));
        JsonlWorkflowLogger::new(&path)
            .unwrap()
            .log(WorkflowEvent::new("second", serde_json::json!({})));

        let types: Vec<_> = read_lines(&path)
            .iter()
            .map(|v| v["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(types, vec!["first", "second"]);
    }
}
