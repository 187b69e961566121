//! JSON-file-backed store holding the knowledge base in insertion order.
//!
//! Loading never fails: a missing, unreadable, or malformed file yields the
//! built-in defaults and the cause is logged. Saving writes a sibling
//! temporary file and renames it over the target, so a failed save leaves the
//! previous file intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{default_entries, Entry};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("expected a JSON array of entries, found {0}")]
    NotAnArray(&'static str),
}

/// Ordered knowledge base bound to the file it saves to and loads from.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    path: PathBuf,
    entries: Vec<Entry>,
}

impl KnowledgeStore {
    /// Opens the store at `path`, falling back to the default entries when the file is unusable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = load_or_default(&path);
        Self { path, entries }
    }

    /// Opens the store at `path` without the default fallback; used for pre-flight checks.
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)?;
        Ok(Self { path, entries })
    }

    /// Builds a store from explicit entries without touching the file.
    pub fn with_entries(path: impl AsRef<Path>, entries: Vec<Entry>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry in memory only; call [`KnowledgeStore::save`] to persist it.
    pub fn add(&mut self, entry: Entry) {
        tracing::debug!(
            target: "kbchat::knowledge",
            question = %entry.question,
            tags = entry.tags.len(),
            "Entry added"
        );
        self.entries.push(entry);
    }

    /// Writes every entry to the bound file.
    pub fn save(&self) -> Result<(), StoreError> {
        write_entries(&self.path, &self.entries)?;
        tracing::info!(
            target: "kbchat::knowledge",
            path = %self.path.display(),
            entries = self.entries.len(),
            "Knowledge base saved"
        );
        Ok(())
    }

    /// Replaces all in-memory entries with the file contents (or the defaults).
    pub fn reload(&mut self) {
        self.entries = load_or_default(&self.path);
        tracing::info!(
            target: "kbchat::knowledge",
            path = %self.path.display(),
            entries = self.entries.len(),
            "Knowledge base reloaded"
        );
    }
}

/// Reads entries from `path`, falling back to [`default_entries`] on any failure.
fn load_or_default(path: &Path) -> Vec<Entry> {
    if !path.exists() {
        tracing::debug!(
            target: "kbchat::knowledge",
            path = %path.display(),
            "No knowledge base file; using defaults"
        );
        return default_entries();
    }
    match read_entries(path) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                target: "kbchat::knowledge",
                path = %path.display(),
                error = %e,
                "Knowledge base file unusable; using defaults"
            );
            default_entries()
        }
    }
}

/// Strict read: the file must hold a JSON array of entries.
fn read_entries(path: &Path) -> Result<Vec<Entry>, StoreError> {
    let bytes = fs::read(path)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if !value.is_array() {
        return Err(StoreError::NotAnArray(json_kind(&value)));
    }
    Ok(serde_json::from_value(value)?)
}

fn write_entries(path: &Path, entries: &[Entry]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let bytes = serde_json::to_vec_pretty(entries)?;
    let tmp = temp_path(path);
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "kb.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
