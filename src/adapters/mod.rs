// Adapters layer: concrete implementations of the domain ports (storage, http, display).

pub mod display;
pub mod http;
pub mod storage;

pub use display::ConsoleDisplay;
pub use http::HttpRemote;
pub use storage::{FileStore, MemoryStore};
