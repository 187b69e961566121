//! Question/answer knowledge base.
//!
//! | Piece        | Role                                                   |
//! |--------------|--------------------------------------------------------|
//! | [`Entry`]    | One question/answer/tags record                        |
//! | [`KnowledgeStore`] | Ordered in-memory entries mirrored to a JSON file |
//! | [`default_entries`] | Built-in starter set used when no file is usable |

mod defaults;
mod store;

pub use defaults::default_entries;
pub use store::{KnowledgeStore, StoreError};

use serde::{Deserialize, Serialize};

/// A stored question with its answer and free-form tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}
