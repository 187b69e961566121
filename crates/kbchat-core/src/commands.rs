//! Slash-command parsing and execution against the knowledge store.

use crate::knowledge::{Entry, KnowledgeStore};

pub const ADD_USAGE: &str = "Usage: /add Question|Answer|tag1,tag2";
pub const ADD_MISSING_PARTS: &str =
    "Please provide at least Question and Answer separated by '|'.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type /help for available commands.";
pub const EMPTY_KB: &str = "Knowledge base is empty.";

/// A recognized slash command. Parsing never fails: anything unrecognized is [`Command::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    /// Raw argument text after `/add`, already trimmed.
    Add(String),
    Save,
    Load,
    Unknown(String),
}

impl Command {
    /// Parses `message` as a command. Returns `None` when it does not start with `/`.
    ///
    /// The command token runs up to the first space and is case-insensitive;
    /// the rest of the message (trimmed) is the argument.
    pub fn parse(message: &str) -> Option<Self> {
        let message = message.trim();
        if !message.starts_with('/') {
            return None;
        }
        let (token, arg) = match message.split_once(' ') {
            Some((token, rest)) => (token, rest.trim()),
            None => (message, ""),
        };
        let command = match token.to_lowercase().as_str() {
            "/help" => Self::Help,
            "/list" => Self::List,
            "/add" => Self::Add(arg.to_string()),
            "/save" => Self::Save,
            "/load" => Self::Load,
            _ => Self::Unknown(token.to_string()),
        };
        Some(command)
    }

    /// Runs the command and returns the reply text. Never fails; errors become messages.
    pub fn execute(&self, store: &mut KnowledgeStore) -> String {
        match self {
            Self::Help => help_text(store),
            Self::List => list_entries(store.entries()),
            Self::Add(arg) => match parse_add(arg) {
                Ok(entry) => {
                    store.add(entry);
                    "Added to knowledge base.".to_string()
                }
                Err(hint) => hint.to_string(),
            },
            Self::Save => match store.save() {
                Ok(()) => format!("Saved KB to {}.", store.path().display()),
                Err(e) => {
                    tracing::warn!(target: "kbchat::knowledge", error = %e, "Save failed");
                    format!("Failed to save KB: {}", e)
                }
            },
            Self::Load => {
                store.reload();
                "Knowledge base loaded.".to_string()
            }
            Self::Unknown(_) => UNKNOWN_COMMAND.to_string(),
        }
    }
}

fn help_text(store: &KnowledgeStore) -> String {
    let file_name = store
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| store.path().display().to_string());
    format!(
        "Commands:\n\
         \x20 /help                       Show this help\n\
         \x20 /add Q|A|tag1,tag2          Add new Q/A (use '|' to separate question, answer, tags)\n\
         \x20 /list                       List stored Q/A entries\n\
         \x20 /save                       Save knowledge base to disk ({file_name})\n\
         \x20 /load                       Load knowledge base from disk (overwrites current)\n\
         \n\
         Example for /add:\n\
         /add What is pytest?|A testing framework for Python.|testing,pytest\n"
    )
}

/// One line per entry: `1. Question (tags: a, b)`.
pub fn list_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return EMPTY_KB.to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} (tags: {})", i + 1, entry.question, entry.tags.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits `Q|A[|t1,t2]` into an entry, or returns the hint to show the user.
pub fn parse_add(arg: &str) -> Result<Entry, &'static str> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(ADD_USAGE);
    }
    let parts: Vec<&str> = arg.split('|').map(str::trim).collect();
    let (question, answer) = match parts.as_slice() {
        [question, answer, ..] if !question.is_empty() && !answer.is_empty() => {
            (*question, *answer)
        }
        _ => return Err(ADD_MISSING_PARTS),
    };
    let tags = parts
        .get(2)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    Ok(Entry::new(question, answer).with_tags(tags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> (tempfile::TempDir, KnowledgeStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = KnowledgeStore::with_entries(dir.path().join("kb.json"), Vec::new());
        (dir, store)
    }

    #[test]
    fn parse_recognizes_commands_case_insensitively() {
        assert_eq!(Command::parse("/HELP"), Some(Command::Help));
        assert_eq!(Command::parse("  /List  "), Some(Command::List));
        assert_eq!(Command::parse("/save"), Some(Command::Save));
        assert_eq!(Command::parse("/Load"), Some(Command::Load));
        assert_eq!(
            Command::parse("/add  Q | A "),
            Some(Command::Add("Q | A".to_string()))
        );
        assert_eq!(
            Command::parse("/frobnicate now"),
            Some(Command::Unknown("/frobnicate".to_string()))
        );
    }

    #[test]
    fn text_without_leading_slash_is_not_a_command() {
        assert_eq!(Command::parse("what is /help?"), None);
        assert_eq!(Command::parse("Foo|Bar|x,y"), None);
    }

    #[test]
    fn command_token_ends_at_first_space_only() {
        assert_eq!(
            Command::parse("/add\tQ|A"),
            Some(Command::Unknown("/add\tQ|A".to_string()))
        );
    }

    #[test]
    fn add_then_list_on_empty_store() {
        let (_dir, mut store) = empty_store();
        assert_eq!(list_entries(store.entries()), EMPTY_KB);

        let reply = Command::parse("/add Foo|Bar|x,y").unwrap().execute(&mut store);
        assert_eq!(reply, "Added to knowledge base.");
        assert_eq!(Command::List.execute(&mut store), "1. Foo (tags: x, y)");
    }

    #[test]
    fn add_without_tags_lists_empty_tag_suffix() {
        let (_dir, mut store) = empty_store();
        Command::Add("Foo | Bar".to_string()).execute(&mut store);
        assert_eq!(store.entries(), &[Entry::new("Foo", "Bar")]);
        assert_eq!(Command::List.execute(&mut store), "1. Foo (tags: )");
    }

    #[test]
    fn add_rejects_malformed_arguments() {
        let (_dir, mut store) = empty_store();
        assert_eq!(Command::Add(String::new()).execute(&mut store), ADD_USAGE);
        assert_eq!(
            Command::Add("OnlyOnePart".to_string()).execute(&mut store),
            ADD_MISSING_PARTS
        );
        assert_eq!(parse_add(" | answer"), Err(ADD_MISSING_PARTS));
        assert_eq!(parse_add("question |  "), Err(ADD_MISSING_PARTS));
        assert!(store.is_empty());
    }

    #[test]
    fn add_trims_tags_and_drops_empty_ones() {
        let entry = parse_add(" Q |A| a , ,b,, |ignored").unwrap();
        assert_eq!(entry, Entry::new("Q", "A").with_tags(["a", "b"]));
    }

    #[test]
    fn save_and_load_report_outcome() {
        let (dir, mut store) = empty_store();
        Command::Add("Q|A".to_string()).execute(&mut store);

        let saved = Command::Save.execute(&mut store);
        assert_eq!(saved, format!("Saved KB to {}.", dir.path().join("kb.json").display()));

        Command::Add("Unsaved|gone".to_string()).execute(&mut store);
        assert_eq!(Command::Load.execute(&mut store), "Knowledge base loaded.");
        assert_eq!(store.entries(), &[Entry::new("Q", "A")]);
    }

    #[test]
    fn failed_save_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut store = KnowledgeStore::with_entries(blocker.join("kb.json"), Vec::new());

        let reply = Command::Save.execute(&mut store);
        assert!(reply.starts_with("Failed to save KB: io error:"), "{reply}");
    }

    #[test]
    fn help_names_the_store_file() {
        let (_dir, mut store) = empty_store();
        let help = Command::Help.execute(&mut store);
        assert!(help.starts_with("Commands:\n  /help "));
        assert!(help.contains("Save knowledge base to disk (kb.json)"));
        assert!(help.ends_with("testing,pytest\n"));
    }

    #[test]
    fn unknown_command_does_not_mutate() {
        let (_dir, mut store) = empty_store();
        assert_eq!(Command::Unknown("/x".into()).execute(&mut store), UNKNOWN_COMMAND);
        assert!(store.is_empty());
    }
}
