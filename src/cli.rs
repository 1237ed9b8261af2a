//! Command line surface. Thin wrapper over [`Pipeline`].

use crate::config::{ConfigManager, Paths};
use crate::pipeline::{ApplyReport, Pipeline};
use crate::prompt::StdinPrompter;
use crate::status::FsStatusProbe;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "spicetify-apply",
    version,
    about = "Inject themes, extensions and custom apps into Spotify"
)]
pub struct Cli {
    /// Folder holding config-xpui.yaml, backups, themes and user content
    #[arg(long)]
    pub config_dir: Option<Utf8PathBuf>,

    /// Folder shipped next to the executable (bundled Extensions, CustomApps, jsHelper)
    #[arg(long)]
    pub bundled_dir: Option<Utf8PathBuf>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install assets, user.css, extensions and custom apps
    Apply,
    /// Refresh user.css and theme assets only
    UpdateTheme,
    /// Push all configured extensions again
    UpdateExtensions,
    /// Print the settings file path
    ConfigPath,
}

impl Cli {
    pub fn config_dir(&self) -> Result<Utf8PathBuf> {
        if let Some(dir) = &self.config_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().context("Cannot locate home directory")?;
        let home = Utf8PathBuf::try_from(home).context("Home directory is not valid UTF-8")?;
        Ok(home.join(".spicetify"))
    }

    pub fn bundled_dir(&self) -> Result<Utf8PathBuf> {
        if let Some(dir) = &self.bundled_dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe().context("Cannot locate executable")?;
        let exe = Utf8PathBuf::try_from(exe).context("Executable path is not valid UTF-8")?;
        Ok(exe
            .parent()
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|| Utf8PathBuf::from(".")))
    }
}

/// Run the selected command with real collaborators.
pub fn run(cli: &Cli, config_dir: &Utf8Path) -> Result<()> {
    let manager = ConfigManager::new(config_dir)?;

    if cli.command == Command::ConfigPath {
        println!("{}", manager.settings_path());
        return Ok(());
    }

    let settings = manager.load_settings()?;
    let bundled_dir = cli.bundled_dir()?;
    let paths = Paths::new(manager.config_dir(), &bundled_dir, &settings);

    let probe = FsStatusProbe {
        windows_store: settings.setting.windows_store,
    };
    let prompter = StdinPrompter;
    let pipeline = Pipeline::new(&settings, &paths, &probe, &prompter);

    let report = match cli.command {
        Command::Apply => pipeline.apply()?,
        Command::UpdateTheme => pipeline.update_theme()?,
        Command::UpdateExtensions => pipeline.update_extensions()?,
        Command::ConfigPath => return Ok(()),
    };

    summarize(&report);
    Ok(())
}

/// Map the outcome of a run to the process status. A fatal error is logged
/// here once and turned into status 1.
pub fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn summarize(report: &ApplyReport) {
    let failed_extensions = report.extensions.failed_items();
    let failed_apps = report.custom_apps.failed_items();

    if !failed_extensions.is_empty() {
        tracing::warn!("Extensions not installed: {}", failed_extensions.join(", "));
    }
    if !failed_apps.is_empty() {
        tracing::warn!("Custom apps not installed: {}", failed_apps.join(", "));
    }
    if report.has_failures() {
        let total = report.warnings.len() + failed_extensions.len() + failed_apps.len();
        tracing::warn!("Finished with {} warning(s)", total);
    }
}
