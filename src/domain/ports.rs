use crate::domain::model::{CategoryFilter, ExportArtifact, NewRemoteItem, Notification, Quote};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Durable key to string store. Every write replaces the whole value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// HTTP collection resource the local quotes are reconciled against.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<serde_json::Value>>;
    async fn create_item(&self, item: &NewRemoteItem) -> Result<()>;
}

/// Rendering surface driven by the controller.
pub trait DisplaySink: Send {
    /// `None` renders the "no quotes available" state.
    fn render_quote(&mut self, quote: Option<&Quote>);
    fn render_categories(&mut self, categories: &[String], selected: &CategoryFilter);
    fn notify(&mut self, notification: Notification);
    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn data_dir(&self) -> &str;
    fn sync_interval(&self) -> Duration;
    fn fetch_limit(&self) -> usize;
    fn notification_ttl(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
}
