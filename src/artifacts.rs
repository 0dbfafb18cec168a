// src/artifacts.rs
//! Persists the products of a run into one output directory, keyed by a
//! base name taken from the input file stem.

use crate::error::{DocGenError, Result};
use crate::events::{EventKind, EventLogger};
use crate::item::Item;
use crate::pipeline::DocRun;
use crate::tree::SyntaxError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ERRORS_FILE: &str = "errors.json";

/// One entry of `errors.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

impl ErrorRecord {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start_line: None,
            end_line: None,
        }
    }
}

impl From<&SyntaxError> for ErrorRecord {
    fn from(e: &SyntaxError) -> Self {
        Self {
            message: e.message.clone(),
            start_line: Some(e.start_line),
            end_line: Some(e.end_line),
        }
    }
}

pub struct ArtifactWriter<'a> {
    dir: PathBuf,
    base: String,
    events: &'a EventLogger,
}

impl<'a> ArtifactWriter<'a> {
    /// Creates the output directory if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new(dir: &Path, base: &str, events: &'a EventLogger) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| DocGenError::io(e, dir))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            base: base.to_string(),
            events,
        })
    }

    #[must_use]
    pub fn doc_map_path(&self) -> PathBuf {
        self.keyed("doc_map", "json")
    }

    #[must_use]
    pub fn prompts_path(&self) -> PathBuf {
        self.keyed("prompts", "jsonl")
    }

    #[must_use]
    pub fn generated_docs_path(&self) -> PathBuf {
        self.keyed("generated_docs", "json")
    }

    #[must_use]
    pub fn missing_docs_path(&self) -> PathBuf {
        self.keyed("missing_docs", "log")
    }

    #[must_use]
    pub fn placeholder_path(&self) -> PathBuf {
        self.keyed("placeholder", "php")
    }

    #[must_use]
    pub fn documented_path(&self) -> PathBuf {
        self.keyed("documented", "php")
    }

    #[must_use]
    pub fn preview_path(&self) -> PathBuf {
        self.keyed("preview_patch", "txt")
    }

    #[must_use]
    pub fn errors_path(&self) -> PathBuf {
        self.dir.join(ERRORS_FILE)
    }

    fn keyed(&self, prefix: &str, ext: &str) -> PathBuf {
        self.dir.join(format!("{prefix}_{}.{ext}", self.base))
    }

    /// Removes artifacts left by an earlier run for the same base.
    ///
    /// # Errors
    /// Returns error if an existing artifact cannot be removed.
    pub fn clean(&self) -> Result<usize> {
        let stale = [
            self.doc_map_path(),
            self.prompts_path(),
            self.generated_docs_path(),
            self.missing_docs_path(),
            self.placeholder_path(),
            self.documented_path(),
            self.preview_path(),
            self.errors_path(),
        ];
        let mut removed = 0;
        for path in stale.iter().filter(|p| p.exists()) {
            fs::remove_file(path).map_err(|e| DocGenError::io(e, path))?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Replaces the artifacts of any earlier run for this base with the ones
    /// `run` produced. Returns the written paths.
    ///
    /// # Errors
    /// Returns error if a stale artifact cannot be removed, or if
    /// serialization or a file write fails.
    pub fn write_run(&self, run: &DocRun) -> Result<Vec<PathBuf>> {
        self.clean()?;
        let mut written = vec![self.write_items(&run.items)?];

        let mut jsonl = String::new();
        for entry in &run.prompts {
            jsonl.push_str(&serde_json::to_string(entry)?);
            jsonl.push('\n');
        }
        written.push(self.write(&self.prompts_path(), &jsonl)?);

        if let Some(text) = &run.placeholder {
            written.push(self.write(&self.placeholder_path(), text)?);
        }

        if let Some(generation) = &run.generation {
            let json = serde_json::to_string_pretty(&generation.docs)?;
            written.push(self.write(&self.generated_docs_path(), &json)?);

            if !generation.missing.is_empty() {
                let ids: Vec<String> = generation.missing.iter().map(ToString::to_string).collect();
                written.push(self.write(&self.missing_docs_path(), &ids.join("\n"))?);
            }
        }

        if let Some(text) = &run.documented {
            written.push(self.write(&self.documented_path(), text)?);
        }
        if let Some(text) = &run.preview {
            written.push(self.write(&self.preview_path(), text)?);
        }

        Ok(written)
    }

    /// Replaces earlier artifacts for this base with `errors.json`, plus an
    /// empty item map when `empty_map` is set.
    ///
    /// # Errors
    /// Returns error if a stale artifact cannot be removed or a write fails.
    pub fn write_failure(&self, errors: &[ErrorRecord], empty_map: bool) -> Result<PathBuf> {
        self.clean()?;
        let path = self.write_errors(errors)?;
        if empty_map {
            self.write_items(&[])?;
        }
        Ok(path)
    }

    /// Writes the item map. An empty slice yields `[]`.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn write_items(&self, items: &[Item]) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(items)?;
        self.write(&self.doc_map_path(), &json)
    }

    /// Writes `errors.json`.
    ///
    /// # Errors
    /// Returns error if the write fails.
    pub fn write_errors(&self, errors: &[ErrorRecord]) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(errors)?;
        self.write(&self.errors_path(), &json)
    }

    fn write(&self, path: &Path, content: &str) -> Result<PathBuf> {
        fs::write(path, content).map_err(|e| DocGenError::io(e, path))?;
        self.events.log(EventKind::ArtifactWritten {
            path: path.display().to_string(),
            bytes: content.len(),
        });
        Ok(path.to_path_buf())
    }
}
