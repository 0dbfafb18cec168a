// src/events.rs
//! Machine-readable event logging for a documentation run.
//!
//! Events are appended to `<output dir>/events.jsonl`.

use crate::error::FailureKind;
use crate::item::ItemId;
use crate::normalize::FragmentRule;
use anyhow::Result;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const EVENTS_FILE: &str = "events.jsonl";

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RunStarted {
        input: String,
    },
    Normalized {
        rule: FragmentRule,
        fragment: bool,
        added_lines: usize,
    },
    ParseFailed {
        errors: usize,
    },
    ItemsTagged {
        count: usize,
    },
    PlaceholdersInjected {
        count: usize,
    },
    GenerationSkipped {
        reason: String,
    },
    GenerationRequested {
        id: ItemId,
        prompt_bytes: usize,
    },
    GenerationSucceeded {
        id: ItemId,
        doc_bytes: usize,
    },
    GenerationFailed {
        id: ItemId,
        kind: FailureKind,
        reason: String,
    },
    DocumentApplied {
        replaced: usize,
        unmatched: usize,
    },
    ArtifactWritten {
        path: String,
        bytes: usize,
    },
}

#[derive(Debug, Serialize)]
pub struct DocGenEvent {
    pub timestamp: u64,
    pub kind: EventKind,
}

#[derive(Clone)]
pub struct EventLogger {
    log_path: Option<PathBuf>,
}

impl EventLogger {
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self {
            log_path: Some(output_dir.join(EVENTS_FILE)),
        }
    }

    /// A logger that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { log_path: None }
    }

    /// Deletes the existing log so the next event starts a fresh file.
    ///
    /// # Errors
    /// Returns error if an existing log cannot be removed.
    pub fn reset(&self) -> Result<()> {
        match &self.log_path {
            Some(path) if path.exists() => Ok(fs::remove_file(path)?),
            _ => Ok(()),
        }
    }

    pub fn log(&self, kind: EventKind) {
        let Some(path) = &self.log_path else {
            return;
        };
        // Write failures are ignored.
        if let Ok(json) = Self::serialize_event(kind) {
            let _ = Self::append_to_file(path, &json);
        }
    }

    fn serialize_event(kind: EventKind) -> Result<String> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let event = DocGenEvent { timestamp, kind };
        Ok(serde_json::to_string(&event)?)
    }

    fn append_to_file(path: &Path, line: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}
