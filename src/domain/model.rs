use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Filter value meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Category given to quotes pulled from the remote endpoint.
pub const SERVER_CATEGORY: &str = "Server";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Builds a quote from an arbitrary JSON entry without rejecting it.
    ///
    /// Strings are taken as-is, other scalars use their JSON rendering, and
    /// missing or null fields become empty strings.
    pub fn from_loose(value: &serde_json::Value) -> Self {
        fn field(value: &serde_json::Value, name: &str) -> String {
            match value.get(name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        }

        Self {
            text: field(value, "text"),
            category: field(value, "category"),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// Built-in quotes used on first run.
pub fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote::new(
            "The only way to do great work is to love what you do.",
            "Motivation",
        ),
        Quote::new("Believe you can and you're halfway there.", "Inspiration"),
        Quote::new(
            "The future belongs to those who believe in the beauty of their dreams.",
            "Dreams",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` always means no filtering, even if imported quotes use it as a
    /// category name.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(category) => category,
        }
    }

    pub fn matches(&self, quote: &Quote) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => quote.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: Vec<Quote>,
    pub added_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReport {
    Synced { added: usize },
    UpToDate,
}

/// Body sent when pushing a local quote to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRemoteItem {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

impl From<&Quote> for NewRemoteItem {
    fn from(quote: &Quote) -> Self {
        Self {
            title: quote.text.clone(),
            body: quote.category.clone(),
            user_id: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the notification area; the sink dismisses it after `ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            ttl,
        }
    }
}

/// Serialized collection ready to be handed to the user as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
