use crate::core::persistence::PersistenceStore;
use crate::core::{seed_quotes, CategoryFilter, KeyValueStore, Quote, ALL_CATEGORIES};
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::trimmed_non_empty;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Owner of the in-memory quote collection and the selected filter.
///
/// Every mutation is written through to the persistence store as a whole value.
pub struct QuoteRepository<S: KeyValueStore> {
    quotes: Vec<Quote>,
    filter: CategoryFilter,
    persistence: PersistenceStore<S>,
}

impl<S: KeyValueStore> QuoteRepository<S> {
    /// Empty repository; nothing is read from the store until [`restore`](Self::restore).
    pub fn new(persistence: PersistenceStore<S>) -> Self {
        Self {
            quotes: Vec::new(),
            filter: CategoryFilter::All,
            persistence,
        }
    }

    /// Repository populated from the store, seeded on first run.
    pub fn load(persistence: PersistenceStore<S>) -> Self {
        let mut repository = Self::new(persistence);
        repository.restore();
        repository
    }

    pub fn restore(&mut self) {
        match self.persistence.load() {
            Some(quotes) => {
                tracing::info!("📚 Loaded {} saved quotes", quotes.len());
                self.quotes = quotes;
            }
            None => {
                tracing::info!("📚 No saved quotes found, using built-in quotes");
                self.initialize(seed_quotes());
            }
        }

        self.filter = self
            .persistence
            .load_selected_filter()
            .map(|value| CategoryFilter::from_value(&value))
            .unwrap_or_default();
        self.reconcile_filter();
    }

    pub fn initialize(&mut self, seed: Vec<Quote>) {
        self.quotes = seed;
        self.persist();
    }

    /// Appends a quote after trimming both fields.
    ///
    /// Empty fields are rejected with a validation error and leave the
    /// collection untouched.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = trimmed_non_empty("Quote text", text)?;
        let category = trimmed_non_empty("Category", category)?;
        // "all" 保留給不篩選的選項，作為分類名稱將無法被選取
        if category == ALL_CATEGORIES {
            return Err(QuoteError::validation(format!(
                "Category '{}' is reserved",
                ALL_CATEGORIES
            )));
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        self.persist();

        tracing::debug!("Added quote {}", quote);
        Ok(quote)
    }

    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
        self.persist();
    }

    pub fn list_all(&self) -> Vec<Quote> {
        self.quotes.clone()
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Exact, case-sensitive match; `"all"` returns the whole collection.
    pub fn list_by_category(&self, category: &str) -> Vec<Quote> {
        let filter = CategoryFilter::from_value(category);
        self.quotes
            .iter()
            .filter(|quote| filter.matches(quote))
            .cloned()
            .collect()
    }

    /// Distinct categories in first-occurrence order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.quotes
            .iter()
            .filter(|quote| seen.insert(quote.category.as_str()))
            .map(|quote| quote.category.clone())
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.quotes.iter().any(|quote| quote.category == category)
    }

    pub fn pick_random(&self, category: &str) -> Option<Quote> {
        self.pick_random_with(category, &mut rand::thread_rng())
    }

    pub fn pick_random_with<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Option<Quote> {
        let filter = CategoryFilter::from_value(category);
        let candidates: Vec<&Quote> = self
            .quotes
            .iter()
            .filter(|quote| filter.matches(quote))
            .collect();
        candidates.choose(rng).map(|quote| (*quote).clone())
    }

    pub fn selected_filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Selects `value` and persists it. Unknown categories fall back to `"all"`.
    pub fn set_selected_filter(&mut self, value: &str) -> &CategoryFilter {
        self.filter = CategoryFilter::from_value(value);
        if !self.reconcile_filter() {
            self.persist_filter();
        }
        &self.filter
    }

    /// Resets a filter whose category no longer exists. Returns whether it changed.
    pub fn reconcile_filter(&mut self) -> bool {
        let stale = match &self.filter {
            CategoryFilter::All => false,
            CategoryFilter::Category(category) => !self.has_category(category),
        };

        if stale {
            tracing::info!(
                "Selected category '{}' no longer exists, showing {}",
                self.filter,
                ALL_CATEGORIES
            );
            self.filter = CategoryFilter::All;
            self.persist_filter();
        }
        stale
    }

    fn persist(&self) {
        if let Err(e) = self.persistence.save(&self.quotes) {
            tracing::error!("❌ Failed to save quotes: {}", e);
        }
    }

    fn persist_filter(&self) {
        if let Err(e) = self.persistence.save_selected_filter(self.filter.as_str()) {
            tracing::error!("❌ Failed to save selected category: {}", e);
        }
    }
}
