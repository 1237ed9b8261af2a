//! Probes for the two states the version gate decides on.
//!
//! - [`backup`]: whether a backup exists and matches the installed client
//! - [`host`]: the on-disk layout of an `Apps` folder
//!
//! [`StatusProbe`] bundles both so the pipeline can be driven with fixed
//! states in tests.

pub mod backup;
pub mod host;

use crate::config::Paths;
use crate::models::{BackupState, HostState};
use camino::Utf8Path;

pub trait StatusProbe {
    fn backup_state(&self, paths: &Paths, recorded_version: &str) -> BackupState;

    fn host_state(&self, path: &Utf8Path) -> HostState;

    /// State of the installed client, as opposed to any `Apps`-shaped folder
    fn install_state(&self, path: &Utf8Path) -> HostState {
        self.host_state(path)
    }
}

/// Probe reading the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStatusProbe {
    pub windows_store: bool,
}

impl StatusProbe for FsStatusProbe {
    fn backup_state(&self, paths: &Paths, recorded_version: &str) -> BackupState {
        backup::get(&paths.prefs_path, &paths.backup_folder, recorded_version)
    }

    fn host_state(&self, path: &Utf8Path) -> HostState {
        host::get(path)
    }

    fn install_state(&self, path: &Utf8Path) -> HostState {
        host::get_install(path, self.windows_store)
    }
}
