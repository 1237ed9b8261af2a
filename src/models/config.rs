use serde::{Deserialize, Serialize};

/// Settings loaded from `config-xpui.yaml`.
///
/// This is the single configuration value built at startup and handed to
/// every pipeline step. Nothing below reads process-wide state on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub setting: GeneralSettings,

    #[serde(default)]
    pub additional: AdditionalOptions,

    #[serde(default)]
    pub preprocesses: Preprocesses,

    #[serde(default)]
    pub backup: BackupSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Spotify installation folder (contains `Apps/`)
    #[serde(default)]
    pub spotify_path: String,

    /// Spotify `prefs` file, used to read the installed client version
    #[serde(default)]
    pub prefs_path: String,

    /// Where extracted assets are written. Empty means `<spotify_path>/Apps`.
    #[serde(default)]
    pub app_dest_path: String,

    #[serde(default)]
    pub current_theme: String,

    #[serde(default)]
    pub color_scheme: String,

    #[serde(default = "default_true")]
    pub inject_css: bool,

    #[serde(default = "default_true")]
    pub replace_colors: bool,

    #[serde(default)]
    pub overwrite_assets: bool,

    /// Spotify was installed from the Microsoft Store
    #[serde(default)]
    pub windows_store: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            spotify_path: String::new(),
            prefs_path: String::new(),
            app_dest_path: String::new(),
            current_theme: String::new(),
            color_scheme: String::new(),
            inject_css: true,
            replace_colors: true,
            overwrite_assets: false,
            windows_store: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalOptions {
    /// Extension file names or absolute paths, in install order
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Custom app folder names, in install order
    #[serde(default)]
    pub custom_apps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preprocesses {
    #[serde(default)]
    pub expose_apis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupSection {
    /// Spotify version recorded when the backup was taken
    #[serde(default)]
    pub version: String,
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Whether a theme is selected at all
    pub fn has_theme(&self) -> bool {
        !self.setting.current_theme.trim().is_empty()
    }
}
