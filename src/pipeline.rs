//! The apply pipeline.
//!
//! Steps run strictly in this order, each blocking until done:
//!
//! 1. Version gate (may prompt once)
//! 2. Asset installer (raw or themed tree)
//! 3. Style injector (`user.css`)
//! 4. Theme asset overlay and API wrapper, when enabled
//! 5. Extensions, then the shared dependency link
//! 6. Custom apps
//!
//! Failures in steps 1-3 abort the run. Failures of individual extensions,
//! apps, the link, the overlay or the wrapper are recorded in the
//! [`ApplyReport`] and the run carries on.

use crate::config::{self, Paths};
use crate::models::{AssetMode, HostState, Settings};
use crate::prompt::Prompter;
use crate::services::apps::AppBundler;
use crate::services::assets::{self, AssetInstaller, AssetSources, InstallOutcome};
use crate::services::copy::{FsCopier, TreeCopier};
use crate::services::extensions::ExtensionInjector;
use crate::services::item::BatchReport;
use crate::services::links::{self, DirLinker, LinkOutcome, PlatformLinker};
use crate::services::style::StyleInjector;
use crate::services::version_gate;
use crate::status::StatusProbe;
use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;

const STORE_NOTICE: &str = "You are using the Spotify Windows Store version, which is only partly supported. \
Modded Spotify cannot be launched using the original shortcut or Start menu tile. \
Make a desktop shortcut that runs \"spicetify auto\" to launch it with modifications.";

/// Everything a run did, including recoverable failures.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub install: Option<InstallOutcome>,
    pub stylesheet: Option<Utf8PathBuf>,
    pub theme_assets: bool,
    pub wrapper: bool,
    pub extensions: BatchReport,
    pub link: Option<LinkOutcome>,
    pub custom_apps: BatchReport,
    /// Non-fatal problems outside the per-item batches
    pub warnings: Vec<String>,
}

impl ApplyReport {
    /// Whether any recoverable failure was recorded
    pub fn has_failures(&self) -> bool {
        !self.extensions.is_clean() || !self.custom_apps.is_clean() || !self.warnings.is_empty()
    }

    fn warn(&mut self, message: String) {
        tracing::error!("{}", message);
        self.warnings.push(message);
    }
}

/// One run against one destination, with every collaborator passed in.
pub struct Pipeline<'a> {
    settings: &'a Settings,
    paths: &'a Paths,
    probe: &'a dyn StatusProbe,
    prompter: &'a dyn Prompter,
    copier: &'a dyn TreeCopier,
    linker: &'a dyn DirLinker,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        paths: &'a Paths,
        probe: &'a dyn StatusProbe,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            settings,
            paths,
            probe,
            prompter,
            copier: &FsCopier,
            linker: &PlatformLinker,
        }
    }

    pub fn with_copier(mut self, copier: &'a dyn TreeCopier) -> Self {
        self.copier = copier;
        self
    }

    pub fn with_linker(mut self, linker: &'a dyn DirLinker) -> Self {
        self.linker = linker;
        self
    }

    /// Full apply run.
    pub fn apply(&self) -> Result<ApplyReport> {
        let host_state = self.check_states()?;
        let mut report = ApplyReport::default();

        report.install = Some(self.install_assets()?);

        tracing::info!("Transferring user.css");
        report.stylesheet = Some(self.update_css()?);

        if self.settings.setting.overwrite_assets {
            self.update_assets(&mut report);
        }

        if self.settings.preprocesses.expose_apis {
            match assets::install_wrapper(&self.paths.js_helper_dir, &self.paths.injection_dir()) {
                Ok(_) => report.wrapper = true,
                Err(e) => report.warn(format!("Cannot copy {}: {}", assets::WRAPPER_SCRIPT, e)),
            }
        }

        let extensions = &self.settings.additional.extensions;
        if !extensions.is_empty() {
            tracing::info!("Transferring extensions");
            report.extensions = self.push_extensions(extensions);

            match links::provision(&self.paths.extensions(), &self.paths.injection_dir(), self.linker) {
                Ok(outcome) => report.link = Some(outcome),
                Err(e) => report.warn(e.to_string()),
            }
        }

        let custom_apps = &self.settings.additional.custom_apps;
        if !custom_apps.is_empty() {
            tracing::info!("Transferring custom apps");
            let search = self.paths.custom_apps();
            report.custom_apps = AppBundler::new(&search).push_all(custom_apps, &self.paths.injection_dir());
        }

        tracing::info!("Spotify is spiced up!");

        if host_state == HostState::RestrictedDistribution {
            tracing::info!("{}", STORE_NOTICE);
        }

        Ok(report)
    }

    /// Refresh `user.css` and, when enabled, the theme's assets.
    pub fn update_theme(&self) -> Result<ApplyReport> {
        self.check_states()?;

        if !self.settings.has_theme() {
            bail!("Nothing is updated: Config \"current_theme\" is blank.");
        }

        let mut report = ApplyReport::default();
        report.stylesheet = Some(self.update_css()?);
        tracing::info!("Custom CSS is updated");

        if self.settings.setting.overwrite_assets {
            self.update_assets(&mut report);
            tracing::info!("Custom assets are updated");
        }

        Ok(report)
    }

    /// Push every configured extension again.
    pub fn update_extensions(&self) -> Result<ApplyReport> {
        self.check_states()?;

        let extensions = &self.settings.additional.extensions;
        if extensions.is_empty() {
            bail!("No extension to update.");
        }

        let report = ApplyReport {
            extensions: self.push_extensions(extensions),
            ..Default::default()
        };
        tracing::info!("All extensions are updated.");
        Ok(report)
    }

    fn check_states(&self) -> Result<HostState> {
        let backup_state = self
            .probe
            .backup_state(self.paths, &self.settings.backup.version);
        let host_state = self.probe.install_state(&self.paths.app_path);
        tracing::debug!("Backup state {:?}, host state {:?}", backup_state, host_state);

        version_gate::check(backup_state, host_state, self.prompter)?;
        Ok(host_state)
    }

    fn install_assets(&self) -> Result<InstallOutcome> {
        let dest = &self.paths.app_dest_path;
        let dest_applied = self.probe.host_state(dest).is_applied();
        let mode = AssetMode::from_replace_colors(self.settings.setting.replace_colors);

        let outcome = AssetInstaller::new(self.copier).install(
            mode,
            dest_applied,
            AssetSources {
                raw: &self.paths.raw_folder,
                themed: &self.paths.themed_folder,
            },
            dest,
        )?;
        Ok(outcome)
    }

    fn update_css(&self) -> Result<Utf8PathBuf> {
        let theme = self.paths.theme_folder.as_deref();

        let user_css = match theme {
            Some(theme) if self.settings.setting.inject_css => Some(theme.join("user.css")),
            _ => None,
        };

        let scheme = match theme {
            Some(theme) => config::load_color_scheme(theme, &self.settings.setting.color_scheme)?,
            None => None,
        };

        let injection_dir = self.paths.injection_dir();
        StyleInjector::new()
            .inject(&injection_dir, user_css.as_deref(), scheme.as_ref())
            .with_context(|| format!("Failed to write user.css into {}", injection_dir))
    }

    fn update_assets(&self, report: &mut ApplyReport) {
        let Some(theme) = self.paths.theme_folder.as_deref() else {
            return;
        };

        match assets::overlay_theme_assets(self.copier, theme, &self.paths.injection_dir()) {
            Ok(copied) => report.theme_assets = copied,
            Err(e) => report.warn(format!("Cannot overwrite custom assets: {}", e)),
        }
    }

    fn push_extensions(&self, names: &[String]) -> BatchReport {
        let search = self.paths.extensions();
        ExtensionInjector::new(&search).push_all(names, &self.paths.injection_dir())
    }
}
