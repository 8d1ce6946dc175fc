use crate::app::commands::Command;
use crate::core::persistence::PersistenceStore;
use crate::core::repository::QuoteRepository;
use crate::core::sync::{apply_batch, RemoteSync};
use crate::core::transfer::{export_to_file, import_from_file};
use crate::core::{
    DisplaySink, ExportArtifact, KeyValueStore, Notification, NotificationLevel, Quote,
    RemoteSource, SyncReport,
};
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Result of a network call started by the command loop.
#[derive(Debug)]
enum RemoteOutcome {
    Pushed { quote: Quote, ok: bool },
    Fetched(Vec<Quote>),
}

/// Command surface the UI layer drives.
///
/// Owns the repository outright; all mutations go through `&mut self`, so
/// user commands and sync ticks never interleave inside one operation.
/// Inside [`run`](Self::run) network calls are spawned as tasks and only
/// their results come back to the loop.
pub struct PresentationController<S: KeyValueStore, R: RemoteSource, D: DisplaySink> {
    repository: QuoteRepository<S>,
    sync: Arc<RemoteSync<R>>,
    display: D,
    notification_ttl: Duration,
}

impl<S, R, D> PresentationController<S, R, D>
where
    S: KeyValueStore,
    R: RemoteSource + 'static,
    D: DisplaySink,
{
    pub fn new(persistence: PersistenceStore<S>, sync: RemoteSync<R>, display: D) -> Self {
        Self {
            repository: QuoteRepository::new(persistence),
            sync: Arc::new(sync),
            display,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }

    pub fn with_notification_ttl(mut self, ttl: Duration) -> Self {
        self.notification_ttl = ttl;
        self
    }

    pub fn repository(&self) -> &QuoteRepository<S> {
        &self.repository
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Loads saved state, or the seed quotes on first run, without rendering.
    pub fn load_state(&mut self) {
        self.repository.restore();
    }

    /// Loads saved state, then renders the filter and one quote.
    pub fn initialize(&mut self) -> Option<Quote> {
        self.load_state();
        self.render_categories();
        self.show_random()
    }

    pub fn show_random(&mut self) -> Option<Quote> {
        let quote = self
            .repository
            .pick_random(self.repository.selected_filter().as_str());
        self.display.render_quote(quote.as_ref());
        quote
    }

    pub fn change_filter(&mut self, value: &str) -> Option<Quote> {
        let selected = self.repository.set_selected_filter(value);
        tracing::debug!("Filter changed to {}", selected);
        self.render_categories();
        self.show_random()
    }

    /// Adds a quote locally, then tries to push it to the remote endpoint.
    ///
    /// A failed push is only reported; the local quote stays.
    pub async fn add_quote(&mut self, text: &str, category: &str) -> Result<Quote> {
        let quote = self.add_local(text, category)?;
        let ok = self.sync.push(&quote).await;
        self.push_finished(&quote, ok);
        Ok(quote)
    }

    fn add_local(&mut self, text: &str, category: &str) -> Result<Quote> {
        match self.repository.add(text, category) {
            Ok(quote) => {
                self.render_categories();
                self.notify(NotificationLevel::Success, "Quote added successfully!");
                Ok(quote)
            }
            Err(e) => {
                self.notify(NotificationLevel::Error, e.user_friendly_message());
                Err(e)
            }
        }
    }

    fn push_finished(&mut self, quote: &Quote, ok: bool) {
        if ok {
            self.notify(NotificationLevel::Success, "Quote synced to server");
        } else {
            tracing::debug!("Push of {} failed, quote kept locally", quote);
            self.notify(NotificationLevel::Error, "Could not sync quote to server");
        }
    }

    /// Replaces the whole collection with the file contents, or nothing at all.
    pub fn import_now(&mut self, contents: &str) -> Result<usize> {
        let quotes = match import_from_file(contents) {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!("⚠️ Import rejected: {}", e);
                self.notify(NotificationLevel::Error, e.user_friendly_message());
                return Err(e);
            }
        };

        let count = quotes.len();
        self.repository.replace_all(quotes);
        self.repository.reconcile_filter();
        self.render_categories();
        self.notify(
            NotificationLevel::Success,
            format!("Quotes imported successfully ({})", count),
        );
        self.show_random();

        tracing::info!("📥 Imported {} quotes", count);
        Ok(count)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        match std::fs::read_to_string(path) {
            Ok(contents) => self.import_now(&contents),
            Err(e) => {
                self.notify(
                    NotificationLevel::Error,
                    format!("Could not read {}: {}", path.display(), e),
                );
                Err(e.into())
            }
        }
    }

    pub fn export_now(&mut self) -> Result<ExportArtifact> {
        let artifact = export_to_file(self.repository.quotes())?;

        if let Err(e) = self.display.deliver(&artifact) {
            self.notify(NotificationLevel::Error, e.user_friendly_message());
            return Err(e);
        }

        self.notify(
            NotificationLevel::Success,
            format!("Exported {} quotes", self.repository.len()),
        );
        Ok(artifact)
    }

    pub async fn sync_now(&mut self) -> SyncReport {
        let report = self.sync.run_sync_cycle(&mut self.repository).await;
        self.report_sync(report)
    }

    /// Merges against the collection as it is now, including quotes added
    /// while the fetch was in flight.
    fn remote_fetched(&mut self, remote: &[Quote]) -> SyncReport {
        let report = apply_batch(&mut self.repository, remote);
        self.report_sync(report)
    }

    fn report_sync(&mut self, report: SyncReport) -> SyncReport {
        match report {
            SyncReport::Synced { added } => {
                self.render_categories();
                self.notify(
                    NotificationLevel::Success,
                    format!("Quotes synced with server ({} new)", added),
                );
            }
            SyncReport::UpToDate => {
                self.notify(NotificationLevel::Info, "Quotes are already up to date");
            }
        }
        report
    }

    /// Runs one command without waiting on the network. Returns `false` once
    /// the controller should stop.
    fn handle(&mut self, command: Command, pending: &mut JoinSet<RemoteOutcome>) -> bool {
        match command {
            Command::NewQuote => {
                self.show_random();
            }
            Command::ChangeFilter(value) => {
                self.change_filter(&value);
            }
            Command::AddQuote { text, category } => {
                // 錯誤已透過通知呈現給使用者
                if let Ok(quote) = self.add_local(&text, &category) {
                    let sync = Arc::clone(&self.sync);
                    pending.spawn(async move {
                        let ok = sync.push(&quote).await;
                        RemoteOutcome::Pushed { quote, ok }
                    });
                }
            }
            Command::Export => {
                let _ = self.export_now();
            }
            Command::Import(path) => {
                let _ = self.import_file(&path);
            }
            Command::Sync => {
                let sync = Arc::clone(&self.sync);
                pending.spawn(async move { RemoteOutcome::Fetched(sync.fetch_remote().await) });
            }
            Command::Quit => return false,
        }
        true
    }

    fn finish(&mut self, outcome: RemoteOutcome) {
        match outcome {
            RemoteOutcome::Pushed { quote, ok } => self.push_finished(&quote, ok),
            RemoteOutcome::Fetched(remote) => {
                self.remote_fetched(&remote);
            }
        }
    }

    /// Processes commands until `Quit` or until every sender is gone.
    ///
    /// Pushes and fetches run concurrently with later commands. After `Quit`
    /// no new commands are read, but in-flight network calls still report.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) {
        let mut pending = JoinSet::new();
        let mut accepting = true;

        while accepting || !pending.is_empty() {
            tokio::select! {
                // 先處理使用者指令，網路結果其次
                biased;

                command = commands.recv(), if accepting => match command {
                    Some(command) => {
                        tracing::debug!("Handling command: {:?}", command);
                        accepting = self.handle(command, &mut pending);
                    }
                    None => accepting = false,
                },
                Some(joined) = pending.join_next(), if !pending.is_empty() => match joined {
                    Ok(outcome) => self.finish(outcome),
                    Err(e) => tracing::warn!("⚠️ Remote task failed: {}", e),
                },
                else => break,
            }
        }
        tracing::info!("Controller stopped");
    }

    pub fn render_categories(&mut self) {
        let categories = self.repository.categories();
        self.display
            .render_categories(&categories, self.repository.selected_filter());
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.display
            .notify(Notification::new(level, message, self.notification_ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::core::{seed_quotes, CategoryFilter, NewRemoteItem};
    use crate::utils::error::QuoteError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingDisplay {
        quotes: Vec<Option<Quote>>,
        category_renders: Vec<(Vec<String>, CategoryFilter)>,
        notifications: Vec<Notification>,
        delivered: Vec<ExportArtifact>,
    }

    impl DisplaySink for RecordingDisplay {
        fn render_quote(&mut self, quote: Option<&Quote>) {
            self.quotes.push(quote.cloned());
        }

        fn render_categories(&mut self, categories: &[String], selected: &CategoryFilter) {
            self.category_renders
                .push((categories.to_vec(), selected.clone()));
        }

        fn notify(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }

        fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
            self.delivered.push(artifact.clone());
            Ok(())
        }
    }

    struct StaticRemote {
        items: Vec<serde_json::Value>,
        accept_posts: bool,
    }

    #[async_trait]
    impl RemoteSource for StaticRemote {
        async fn fetch_items(&self) -> Result<Vec<serde_json::Value>> {
            Ok(self.items.clone())
        }

        async fn create_item(&self, _item: &NewRemoteItem) -> Result<()> {
            if self.accept_posts {
                Ok(())
            } else {
                Err(QuoteError::RemoteStatusError { status: 500 })
            }
        }
    }

    fn controller(
        items: serde_json::Value,
        accept_posts: bool,
    ) -> PresentationController<MemoryStore, StaticRemote, RecordingDisplay> {
        let remote = StaticRemote {
            items: items.as_array().cloned().unwrap_or_default(),
            accept_posts,
        };
        let mut controller = PresentationController::new(
            PersistenceStore::new(MemoryStore::new()),
            RemoteSync::new(remote),
            RecordingDisplay::default(),
        );
        controller.initialize();
        controller
    }

    fn last_message(controller: &PresentationController<MemoryStore, StaticRemote, RecordingDisplay>) -> &str {
        &controller.display().notifications.last().unwrap().message
    }

    #[test]
    fn test_initialize_renders_categories_and_a_quote() {
        let controller = controller(serde_json::json!([]), true);
        let display = controller.display();

        assert_eq!(
            display.category_renders[0].0,
            vec!["Motivation", "Inspiration", "Dreams"]
        );
        assert_eq!(display.quotes.len(), 1);
        assert!(seed_quotes().contains(display.quotes[0].as_ref().unwrap()));
    }

    #[test]
    fn test_change_filter_renders_matching_quote() {
        let mut controller = controller(serde_json::json!([]), true);

        for _ in 0..10 {
            let quote = controller.change_filter("Dreams").unwrap();
            assert_eq!(quote.category, "Dreams");
        }
        assert_eq!(
            controller.repository().selected_filter(),
            &CategoryFilter::Category("Dreams".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_quote_notifies_push_result() {
        let mut controller = controller(serde_json::json!([]), true);

        controller.add_quote("Test", "Life").await.unwrap();

        assert_eq!(controller.repository().len(), 4);
        assert_eq!(last_message(&controller), "Quote synced to server");
        assert_eq!(
            controller.display().notifications.last().unwrap().ttl,
            DEFAULT_NOTIFICATION_TTL
        );
    }

    #[tokio::test]
    async fn test_add_quote_keeps_local_when_push_fails() {
        let mut controller = controller(serde_json::json!([]), false);

        controller.add_quote("Test", "Life").await.unwrap();

        assert_eq!(controller.repository().len(), 4);
        assert_eq!(last_message(&controller), "Could not sync quote to server");
        assert_eq!(
            controller.display().notifications.last().unwrap().level,
            NotificationLevel::Error
        );
    }

    #[tokio::test]
    async fn test_add_quote_validation_failure() {
        let mut controller = controller(serde_json::json!([]), true);

        let result = controller.add_quote("   ", "Life").await;

        assert!(matches!(result, Err(QuoteError::ValidationError { .. })));
        assert_eq!(controller.repository().len(), 3);
        assert_eq!(
            controller.display().notifications.last().unwrap().level,
            NotificationLevel::Error
        );
    }

    #[tokio::test]
    async fn test_sync_now_messages() {
        let mut controller = controller(serde_json::json!([{"title": "From server"}]), true);

        let report = controller.sync_now().await;
        assert_eq!(report, SyncReport::Synced { added: 1 });
        assert_eq!(last_message(&controller), "Quotes synced with server (1 new)");
        assert!(controller
            .display()
            .category_renders
            .last()
            .unwrap()
            .0
            .contains(&"Server".to_string()));

        let report = controller.sync_now().await;
        assert_eq!(report, SyncReport::UpToDate);
        assert_eq!(last_message(&controller), "Quotes are already up to date");
    }

    #[test]
    fn test_import_rejects_and_keeps_collection() {
        let mut controller = controller(serde_json::json!([]), true);
        let before = controller.repository().list_all();

        let result = controller.import_now(r#"{"text": "x", "category": "y"}"#);

        assert!(result.is_err());
        assert_eq!(controller.repository().list_all(), before);
        assert_eq!(
            controller.display().notifications.last().unwrap().level,
            NotificationLevel::Error
        );
    }

    #[test]
    fn test_import_resets_vanished_filter() {
        let mut controller = controller(serde_json::json!([]), true);
        controller.change_filter("Motivation");

        let count = controller
            .import_now(r#"[{"text": "Only", "category": "Other"}]"#)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(controller.repository().selected_filter(), &CategoryFilter::All);
        assert_eq!(
            controller.display().quotes.last().unwrap().as_ref().unwrap().text,
            "Only"
        );
    }

    #[test]
    fn test_export_delivers_artifact() {
        let mut controller = controller(serde_json::json!([]), true);

        let artifact = controller.export_now().unwrap();

        assert_eq!(controller.display().delivered, vec![artifact.clone()]);
        assert_eq!(artifact.file_name, "quotes.json");
    }

    #[tokio::test]
    async fn test_run_processes_until_quit() {
        let mut controller = controller(serde_json::json!([{"title": "Remote"}]), true);
        let (tx, rx) = mpsc::channel(8);

        tx.send(Command::Sync).await.unwrap();
        tx.send(Command::AddQuote {
            text: "Looped".to_string(),
            category: "Life".to_string(),
        })
        .await
        .unwrap();
        tx.send(Command::Quit).await.unwrap();
        tx.send(Command::Sync).await.unwrap();

        controller.run(rx).await;

        let texts: Vec<String> = controller
            .repository()
            .list_all()
            .into_iter()
            .map(|quote| quote.text)
            .collect();
        // 新增在本地立即完成，同步結果之後才合併
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[3], "Looped");
        assert_eq!(texts[4], "Remote");
        assert!(controller
            .display()
            .notifications
            .iter()
            .any(|notification| notification.message == "Quote synced to server"));
    }

    #[test]
    fn test_empty_collection_renders_no_quote_state() {
        let mut controller = controller(serde_json::json!([]), true);
        controller.import_now("[]").unwrap();

        assert_eq!(controller.show_random(), None);
        assert_eq!(controller.display().quotes.last(), Some(&None));
    }
}
