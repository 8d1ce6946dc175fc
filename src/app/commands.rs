use crate::utils::error::{QuoteError, Result};
use std::path::PathBuf;

/// User actions and timer ticks, handled one at a time by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewQuote,
    ChangeFilter(String),
    AddQuote { text: String, category: String },
    Export,
    Import(PathBuf),
    Sync,
    Quit,
}

pub const USAGE: &str = "Commands: new | filter <category|all> | add <text> | <category> | export | import <file> | sync | quit";

impl Command {
    /// Parses one line of interactive input. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "new" | "next" => Command::NewQuote,
            "filter" if !rest.is_empty() => Command::ChangeFilter(rest.to_string()),
            "add" => {
                let (text, category) = rest.split_once('|').ok_or_else(|| {
                    QuoteError::validation("Use: add <text> | <category>")
                })?;
                Command::AddQuote {
                    text: text.to_string(),
                    category: category.to_string(),
                }
            }
            "export" => Command::Export,
            "import" if !rest.is_empty() => Command::Import(PathBuf::from(rest)),
            "sync" => Command::Sync,
            "quit" | "exit" => Command::Quit,
            _ => return Err(QuoteError::validation(format!("Unknown command '{}'. {}", line, USAGE))),
        };
        Ok(Some(command))
    }
}
