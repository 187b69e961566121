//! Message handler: one inbound text message in, one reply out.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::commands::Command;
use crate::config::CoreConfig;
use crate::knowledge::{Entry, KnowledgeStore};
use crate::matcher::find_best_answer;
use crate::render::render_answer;

pub const EMPTY_MESSAGE: &str = "(empty message)";

/// Owns the process-wide knowledge store. Every message holds the lock for its whole run,
/// so commands and queries never interleave.
pub struct Assistant {
    store: Mutex<KnowledgeStore>,
}

impl Assistant {
    /// Opens the store file (or the defaults) named by `config.kb_path`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::open(config.kb_path())
    }

    pub fn open(kb_path: impl AsRef<Path>) -> Self {
        Self::new(KnowledgeStore::open(kb_path))
    }

    pub fn new(store: KnowledgeStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Handles one message: a slash command, or a free-text query answered from the store.
    pub fn handle(&self, message: &str) -> String {
        let text = message.trim();
        if text.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let mut store = self.lock();
        if let Some(command) = Command::parse(text) {
            tracing::debug!(target: "kbchat::assistant", ?command, "Dispatching command");
            return command.execute(&mut store);
        }

        let best = find_best_answer(store.entries(), text);
        tracing::debug!(
            target: "kbchat::assistant",
            kind = ?best.kind,
            score = best.score,
            question = best.entry.map(|e| e.question.as_str()).unwrap_or(""),
            "Query answered"
        );
        render_answer(&best)
    }

    pub fn entry_count(&self) -> usize {
        self.lock().len()
    }

    /// Snapshot of the current entries, in store order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries().to_vec()
    }

    pub fn kb_path(&self) -> String {
        self.lock().path().display().to_string()
    }

    fn lock(&self) -> MutexGuard<'_, KnowledgeStore> {
        // entries are only ever pushed or replaced whole, so a poisoned store is still consistent
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
