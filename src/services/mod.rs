//! Services module - the injection steps of an apply run.
//!
//! Each step is framework-agnostic and takes its inputs explicitly; none of
//! them reads settings or environment on its own.
//!
//! # Components
//!
//! - [`version_gate`]: decides Abort / WarnConfirm / Proceed from backup and host states
//! - [`assets`]: copies the raw or themed asset tree into the destination
//! - [`style`]: writes `user.css` with color scheme tokens resolved
//! - [`extensions`]: copies extension scripts and rewrites `spicetify_map` directives
//! - [`apps`]: bundles custom apps into webpack chunks
//! - [`links`]: links the shared `node_modules` folder into the destination
//!
//! Supporting pieces:
//!
//! - [`resolve`]: user-then-bundled folder lookup shared by extensions, apps and themes
//! - [`copy`]: recursive tree copy
//! - [`item`]: per-item errors and batch reports
//!
//! # Error model
//!
//! Gate and installer failures are fatal and surface as `Err`. Anything that
//! concerns a single extension or app is an [`ItemError`] recorded in a
//! [`BatchReport`]; the batch always continues with the next item.

pub mod apps;
pub mod assets;
pub mod copy;
pub mod extensions;
pub mod item;
pub mod links;
pub mod resolve;
pub mod style;
pub mod version_gate;

pub use apps::{AppBundler, wrap_chunk};
pub use assets::{AssetInstaller, AssetSources, InstallError, InstallOutcome};
pub use copy::{FsCopier, TreeCopier};
pub use extensions::{ExtensionInjector, SymbolMapper};
pub use item::{BatchReport, ItemError};
pub use links::{DirLinker, LinkError, LinkOutcome, PlatformLinker};
pub use resolve::SearchPath;
pub use style::StyleInjector;
pub use version_gate::{GateDecision, GateError};
