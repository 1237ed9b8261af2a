use crate::models::AssetMode;
use crate::services::copy::{TreeCopier, copy_file};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;

/// File name of the API wrapper shipped in `jsHelper/`
pub const WRAPPER_SCRIPT: &str = "spicetifyWrapper.js";

/// Failures that leave the destination tree in an unknown state.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {from} into {to}: {source}")]
    Copy {
        from: Utf8PathBuf,
        to: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Sources of the two mutually exclusive asset trees.
#[derive(Debug, Clone, Copy)]
pub struct AssetSources<'a> {
    pub raw: &'a Utf8Path,
    pub themed: &'a Utf8Path,
}

/// Which copies ran during [`AssetInstaller::install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallOutcome {
    /// The destination was wiped and rebuilt from the raw tree
    pub extracted_stock: bool,
    pub mode: AssetMode,
}

/// Populates the destination with raw or themed assets.
///
/// An uninitialized destination is always removed and rebuilt from the raw
/// tree first, so no stock leftovers survive and themed files always land on
/// a normalized raw tree. Afterwards the themed tree is overlaid, or the raw
/// tree is copied again if it was not just extracted.
pub struct AssetInstaller<'a> {
    copier: &'a dyn TreeCopier,
}

impl<'a> AssetInstaller<'a> {
    pub fn new(copier: &'a dyn TreeCopier) -> Self {
        Self { copier }
    }

    pub fn install(
        &self,
        mode: AssetMode,
        dest_applied: bool,
        sources: AssetSources<'_>,
        dest: &Utf8Path,
    ) -> Result<InstallOutcome, InstallError> {
        let mut extracted_stock = false;

        if !dest_applied {
            tracing::info!("Copying raw assets");
            self.reset(dest)?;
            self.copy_tree(sources.raw, dest)?;
            extracted_stock = true;
        }

        match mode {
            AssetMode::Themed => {
                tracing::info!("Overwriting themed assets");
                self.copy_tree(sources.themed, dest)?;
            }
            AssetMode::Raw if !extracted_stock => {
                tracing::info!("Overwriting raw assets");
                self.copy_tree(sources.raw, dest)?;
            }
            AssetMode::Raw => {}
        }

        Ok(InstallOutcome {
            extracted_stock,
            mode,
        })
    }

    fn reset(&self, dest: &Utf8Path) -> Result<(), InstallError> {
        match fs::remove_dir_all(dest) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(InstallError::Remove {
                path: dest.to_path_buf(),
                source,
            }),
        }
    }

    fn copy_tree(&self, from: &Utf8Path, to: &Utf8Path) -> Result<(), InstallError> {
        self.copier
            .copy(from, to, true, None)
            .map_err(|source| InstallError::Copy {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
    }
}

/// Overlay `<theme>/assets` onto the injection folder.
///
/// Returns `false` when the theme ships no assets.
pub fn overlay_theme_assets(
    copier: &dyn TreeCopier,
    theme_folder: &Utf8Path,
    injection_dir: &Utf8Path,
) -> io::Result<bool> {
    let assets = theme_folder.join("assets");
    if !assets.is_dir() {
        tracing::debug!("Theme has no assets folder at {}", assets);
        return Ok(false);
    }

    copier.copy(&assets, injection_dir, true, None)?;
    Ok(true)
}

/// Copy the API wrapper script into the injection folder.
pub fn install_wrapper(js_helper_dir: &Utf8Path, injection_dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
    copy_file(&js_helper_dir.join(WRAPPER_SCRIPT), injection_dir)
}
