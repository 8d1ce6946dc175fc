#![allow(dead_code)]

use httpmock::MockServer;
use quote_sync::core::{CategoryFilter, DisplaySink, ExportArtifact, Notification};
use quote_sync::{
    FileStore, HttpRemote, PersistenceStore, PresentationController, Quote, RemoteSync, Result,
};
use std::path::Path;
use std::time::Duration;

#[derive(Default)]
pub struct RecordingDisplay {
    pub quotes: Vec<Option<Quote>>,
    pub categories: Vec<Vec<String>>,
    pub notifications: Vec<Notification>,
    pub delivered: Vec<ExportArtifact>,
}

impl RecordingDisplay {
    pub fn messages(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .map(|notification| notification.message.as_str())
            .collect()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_quote(&mut self, quote: Option<&Quote>) {
        self.quotes.push(quote.cloned());
    }

    fn render_categories(&mut self, categories: &[String], _selected: &CategoryFilter) {
        self.categories.push(categories.to_vec());
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        self.delivered.push(artifact.clone());
        Ok(())
    }
}

pub type TestController = PresentationController<FileStore, HttpRemote, RecordingDisplay>;

pub fn controller(data_dir: &Path, server: &MockServer) -> TestController {
    let remote = HttpRemote::new(server.url("/posts"), Duration::from_secs(5)).unwrap();
    PresentationController::new(
        PersistenceStore::new(FileStore::new(data_dir)),
        RemoteSync::new(remote),
        RecordingDisplay::default(),
    )
}

pub fn posts(count: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (1..=count)
            .map(|i| {
                serde_json::json!({
                    "userId": 1,
                    "id": i,
                    "title": format!("remote title {}", i),
                    "body": format!("remote body {}", i)
                })
            })
            .collect(),
    )
}
