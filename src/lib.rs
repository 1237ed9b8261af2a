// spicetify-apply - Inject themes, extensions and custom apps into Spotify
//
// This is the library crate containing the injection pipeline and its data structures.
// The binary crate (main.rs) provides the command line entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod services;
pub mod status;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, Paths};
pub use models::{AssetMode, BackupState, HostState, Settings};
pub use pipeline::{ApplyReport, Pipeline};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
