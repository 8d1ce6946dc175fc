pub mod commands;
pub mod controller;

pub use commands::Command;
pub use controller::PresentationController;
