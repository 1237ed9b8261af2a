pub mod paths;

pub use paths::Paths;

use crate::models::Settings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "config-xpui.yaml";

/// File name of a theme's color scheme table
pub const COLORS_FILE: &str = "colors.yaml";

/// Prefix of environment variables overriding settings, e.g.
/// `SPICETIFY__SETTING__CURRENT_THEME=Dribbblish`
pub const ENV_PREFIX: &str = "SPICETIFY";

/// Separator of list values given through the environment
const LIST_SEPARATOR: &str = "|";

/// Settings keys that hold lists
const LIST_KEYS: [&str; 2] = ["additional.extensions", "additional.custom_apps"];

/// Ordered color key → value table of one scheme
pub type ColorScheme = IndexMap<String, String>;

/// Configuration manager for loading and saving `config-xpui.yaml`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager, creating `config_dir` if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        })
    }

    /// Load settings from the YAML file layered under `SPICETIFY__*` environment
    /// variables. A missing file yields defaults.
    ///
    /// List settings take `|`-separated values, e.g.
    /// `SPICETIFY__ADDITIONAL__EXTENSIONS=fullAppDisplay.js|keyboardShortcut.mjs`.
    pub fn load_settings(&self) -> Result<Settings> {
        self.load_settings_from(None)
    }

    /// Same as [`load_settings`](Self::load_settings), reading overrides from
    /// `env` instead of the process environment when given.
    fn load_settings_from(&self, env: Option<config::Map<String, String>>) -> Result<Settings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let mut overrides = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(LIST_SEPARATOR)
            .source(env);
        for key in LIST_KEYS {
            overrides = overrides.with_list_parse_key(key);
        }

        let layered = config::Config::builder()
            .add_source(
                config::File::from(self.settings_path.as_std_path())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(overrides)
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: Settings = layered
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(settings)
    }

    /// Save settings back to the YAML file.
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

/// Load one color scheme from `<theme_folder>/colors.yaml`.
///
/// An empty `scheme_name` picks the first scheme in the file. A missing file
/// or unknown scheme means no substitution was requested and yields `None`.
pub fn load_color_scheme(theme_folder: &Utf8Path, scheme_name: &str) -> Result<Option<ColorScheme>> {
    let colors_path = theme_folder.join(COLORS_FILE);
    if !colors_path.exists() {
        tracing::debug!("No color scheme file at {}", colors_path);
        return Ok(None);
    }

    let file_contents = fs::read_to_string(&colors_path)
        .with_context(|| format!("Failed to read color schemes: {}", colors_path))?;

    let mut schemes: IndexMap<String, ColorScheme> = serde_yaml_ng::from_str(&file_contents)
        .with_context(|| format!("Failed to parse color schemes: {}", colors_path))?;

    let scheme_name = scheme_name.trim();
    let scheme = if scheme_name.is_empty() {
        schemes.shift_remove_index(0).map(|(_, scheme)| scheme)
    } else {
        schemes.shift_remove(scheme_name)
    };

    if scheme.is_none() {
        tracing::warn!(
            "Color scheme \"{}\" not found in {}",
            scheme_name,
            colors_path
        );
    }

    Ok(scheme)
}
