//! Data models for spicetify-apply.
//!
//! - [`Settings`]: the configuration value loaded once from `config-xpui.yaml`
//! - [`BackupState`] / [`HostState`]: inputs to the version gate
//! - [`AssetMode`]: raw or themed asset copy
//! - Descriptors for extensions and custom apps, derived fresh on every run
//!
//! None of these are persisted by the pipeline. The only durable state it
//! touches is Spotify's extracted asset tree.

pub mod config;
pub mod descriptors;
pub mod state;

pub use config::{AdditionalOptions, BackupSection, GeneralSettings, Preprocesses, Settings};
pub use descriptors::{
    AppManifest, CUSTOM_APP_PREFIX, CompiledArtifacts, CustomAppDescriptor, ExtensionDescriptor,
    MODULE_SCRIPT_SUFFIX, SymbolMapping,
};
pub use state::{AssetMode, BackupState, HostState};
