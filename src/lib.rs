pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ConsoleDisplay, FileStore, HttpRemote, MemoryStore};
pub use app::{Command, PresentationController};
pub use config::Settings;
pub use crate::core::{
    persistence::PersistenceStore, repository::QuoteRepository, scheduler::SyncScheduler,
    sync::RemoteSync,
};
pub use domain::model::Quote;
pub use utils::error::{QuoteError, Result};
