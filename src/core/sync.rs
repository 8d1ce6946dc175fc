use crate::core::repository::QuoteRepository;
use crate::core::{
    KeyValueStore, MergeOutcome, NewRemoteItem, Quote, RemoteSource, SyncReport, SERVER_CATEGORY,
};
use std::collections::HashSet;

pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Reconciles the local collection with a remote source.
///
/// Remote failures never reach the caller: a failed fetch is an empty batch
/// and a failed push is `false`.
pub struct RemoteSync<R: RemoteSource> {
    remote: R,
    fetch_limit: usize,
}

impl<R: RemoteSource> RemoteSync<R> {
    pub fn new(remote: R) -> Self {
        Self::with_fetch_limit(remote, DEFAULT_FETCH_LIMIT)
    }

    pub fn with_fetch_limit(remote: R, fetch_limit: usize) -> Self {
        Self {
            remote,
            fetch_limit,
        }
    }

    pub async fn fetch_remote(&self) -> Vec<Quote> {
        let items = match self.remote.fetch_items().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("⚠️ Remote fetch failed: {}", e);
                return Vec::new();
            }
        };

        let quotes: Vec<Quote> = items
            .iter()
            .take(self.fetch_limit)
            .filter_map(map_remote_item)
            .collect();

        tracing::debug!(
            "Fetched {} remote items, mapped {} quotes",
            items.len(),
            quotes.len()
        );
        quotes
    }

    pub async fn push(&self, quote: &Quote) -> bool {
        let item = NewRemoteItem::from(quote);
        match self.remote.create_item(&item).await {
            Ok(()) => {
                tracing::info!("⬆️ Pushed quote to remote: {}", quote);
                true
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to push quote to remote: {}", e);
                false
            }
        }
    }

    /// One merge cycle against the repository's full collection.
    pub async fn run_sync_cycle<S: KeyValueStore>(
        &self,
        repository: &mut QuoteRepository<S>,
    ) -> SyncReport {
        let remote = self.fetch_remote().await;
        apply_batch(repository, &remote)
    }
}

/// Merges an already fetched batch into the repository.
///
/// Persists only when something new arrived.
pub fn apply_batch<S: KeyValueStore>(
    repository: &mut QuoteRepository<S>,
    remote: &[Quote],
) -> SyncReport {
    let outcome = merge(repository.quotes(), remote);

    if outcome.added_count > 0 {
        tracing::info!("🔄 Synced {} new quotes from remote", outcome.added_count);
        repository.replace_all(outcome.merged);
        SyncReport::Synced {
            added: outcome.added_count,
        }
    } else {
        tracing::debug!("Quotes already up to date");
        SyncReport::UpToDate
    }
}

/// Remote items carry no category; only a non-blank string `title` is used.
fn map_remote_item(item: &serde_json::Value) -> Option<Quote> {
    let title = item.get("title")?.as_str()?;
    if title.trim().is_empty() {
        return None;
    }
    Some(Quote::new(title, SERVER_CATEGORY))
}

/// Appends remote quotes whose text is not already present locally.
///
/// Local quotes keep their position; surviving remote quotes follow in the
/// order received. A sync never introduces duplicate text, so a text repeated
/// inside the remote batch is added once.
pub fn merge(local: &[Quote], remote: &[Quote]) -> MergeOutcome {
    let mut known: HashSet<&str> = local.iter().map(|quote| quote.text.as_str()).collect();
    let mut merged = local.to_vec();

    for quote in remote {
        if known.insert(quote.text.as_str()) {
            merged.push(quote.clone());
        }
    }

    let added_count = merged.len() - local.len();
    MergeOutcome {
        merged,
        added_count,
    }
}
