//! kbchat-core: question-answering assistant over a small, file-persisted knowledge base.
//!
//! A message is either a slash command (`/help`, `/list`, `/add`, `/save`, `/load`)
//! run against the store, or a free-text query answered by fuzzy matching.
//! [`Assistant::handle`] is the single entry point for transports.

mod assistant;
mod commands;
mod config;
mod knowledge;
mod matcher;
mod render;
mod similarity;
mod text;

pub use assistant::{Assistant, EMPTY_MESSAGE};
pub use commands::{list_entries, parse_add, Command};
pub use config::{CoreConfig, DEFAULT_KB_PATH};
pub use knowledge::{default_entries, Entry, KnowledgeStore, StoreError};
pub use matcher::{combined_score, find_best_answer, BestAnswer, MatchKind, MATCH_THRESHOLD};
pub use render::{render_answer, wrap_indented, NO_ANSWER};
pub use similarity::{similarity, Block, SequenceMatcher};
pub use text::normalize;
