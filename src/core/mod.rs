pub mod persistence;
pub mod repository;
pub mod scheduler;
pub mod sync;
pub mod transfer;

pub use crate::domain::model::{
    seed_quotes, CategoryFilter, ExportArtifact, MergeOutcome, NewRemoteItem, Notification,
    NotificationLevel, Quote, SyncReport, ALL_CATEGORIES, SERVER_CATEGORY,
};
pub use crate::domain::ports::{ConfigProvider, DisplaySink, KeyValueStore, RemoteSource};
pub use crate::utils::error::Result;
