#![warn(missing_docs)]
//! Deterministic testing surfaces: probe trajectories, event logs and replay checks.

mod determinism;
mod trajectory;

use anyhow::{Context, Result};
use handpoke_core::{FrameTick, InteractableId};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub use determinism::*;
pub use trajectory::*;

/// Primary event record captured by headless runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord<'a> {
    /// Frame on which the event occurred.
    pub tick: FrameTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Interactable involved, if any.
    pub interactable: Option<InteractableId>,
    /// Pointer position at emission.
    pub position: [f32; 3],
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        tracing::debug!(path = %path.display(), "event log created");
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Lines written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read a JSONL log back as untyped values.
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<serde_json::Value>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut values = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid JSON", path.display(), index + 1))?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_round_trips_through_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");
        let mut sink = JsonlSink::create(&path).unwrap();
        sink.write(&EventRecord {
            tick: FrameTick(4),
            kind: "select",
            interactable: Some(InteractableId::from_raw(2)),
            position: [0.0, 0.0, -0.001],
        })
        .unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.written(), 1);

        let values = read_jsonl(&path).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["tick"], 4);
        assert_eq!(values[0]["kind"], "select");
        assert_eq!(values[0]["interactable"], 2);
    }
}
