use crate::core::{KeyValueStore, Quote};
use crate::utils::error::{QuoteError, Result};

pub const QUOTES_KEY: &str = "quotes";
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Reads and writes the quote collection and the selected filter.
///
/// Reads fail soft: anything absent or unreadable comes back as `None`.
#[derive(Debug, Clone)]
pub struct PersistenceStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<Vec<Quote>> {
        match self.try_load() {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!("⚠️ {}; falling back to built-in quotes", e);
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<Vec<Quote>>> {
        let Some(raw) = self.store.get(QUOTES_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str::<Vec<Quote>>(&raw)
            .map(Some)
            .map_err(|e| QuoteError::PersistenceReadError {
                key: QUOTES_KEY.to_string(),
                message: e.to_string(),
            })
    }

    pub fn save(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string(quotes)?;
        self.store.set(QUOTES_KEY, &json)?;
        tracing::debug!("Saved {} quotes", quotes.len());
        Ok(())
    }

    pub fn load_selected_filter(&self) -> Option<String> {
        match self.store.get(SELECTED_CATEGORY_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("⚠️ Could not read selected category: {}", e);
                None
            }
        }
    }

    pub fn save_selected_filter(&self, value: &str) -> Result<()> {
        self.store.set(SELECTED_CATEGORY_KEY, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    #[test]
    fn test_load_absent_is_none() {
        let persistence = PersistenceStore::new(MemoryStore::new());
        assert_eq!(persistence.load(), None);
        assert_eq!(persistence.load_selected_filter(), None);
    }

    #[test]
    fn test_save_then_load() {
        let persistence = PersistenceStore::new(MemoryStore::new());
        let quotes = vec![Quote::new("One", "A"), Quote::new("Two", "B")];

        persistence.save(&quotes).unwrap();

        assert_eq!(persistence.load(), Some(quotes));
    }

    #[test]
    fn test_corrupt_value_is_none() {
        let store = MemoryStore::new();
        store.set(QUOTES_KEY, "{not json").unwrap();
        let persistence = PersistenceStore::new(store.clone());
        assert_eq!(persistence.load(), None);

        store.set(QUOTES_KEY, r#"{"text": "not a list"}"#).unwrap();
        assert_eq!(persistence.load(), None);

        store.set(QUOTES_KEY, r#"[{"text": "missing category"}]"#).unwrap();
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn test_selected_filter_is_plain_string() {
        let store = MemoryStore::new();
        let persistence = PersistenceStore::new(store.clone());

        persistence.save_selected_filter("Motivation").unwrap();

        assert_eq!(store.get(SELECTED_CATEGORY_KEY).unwrap().as_deref(), Some("Motivation"));
        assert_eq!(persistence.load_selected_filter().as_deref(), Some("Motivation"));
    }
}
