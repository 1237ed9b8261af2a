use crate::models::Settings;
use crate::services::resolve::SearchPath;
use camino::{Utf8Path, Utf8PathBuf};

/// Every folder the pipeline reads from or writes to, derived once from the
/// config directory, the bundled directory and [`Settings`].
///
/// Layout of the config directory:
/// - `Backup/`: packed `.spa` archives saved by `backup`
/// - `Extracted/Raw`, `Extracted/Themed`: unpacked stock and color-replaced assets
/// - `Themes/`, `Extensions/`, `CustomApps/`: user content
///
/// The bundled directory (next to the executable) mirrors the user folders and
/// also carries `jsHelper/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub config_dir: Utf8PathBuf,
    pub bundled_dir: Utf8PathBuf,
    pub backup_folder: Utf8PathBuf,
    pub raw_folder: Utf8PathBuf,
    pub themed_folder: Utf8PathBuf,
    pub js_helper_dir: Utf8PathBuf,
    /// Spotify's own `Apps` folder
    pub app_path: Utf8PathBuf,
    /// Folder the extracted assets are written to
    pub app_dest_path: Utf8PathBuf,
    pub prefs_path: Utf8PathBuf,
    /// Resolved folder of the selected theme, if any
    pub theme_folder: Option<Utf8PathBuf>,
}

impl Paths {
    pub fn new(config_dir: &Utf8Path, bundled_dir: &Utf8Path, settings: &Settings) -> Self {
        let spotify_path = Utf8PathBuf::from(&settings.setting.spotify_path);
        let app_path = spotify_path.join("Apps");
        let app_dest_path = if settings.setting.app_dest_path.trim().is_empty() {
            app_path.clone()
        } else {
            Utf8PathBuf::from(&settings.setting.app_dest_path)
        };

        let mut paths = Self {
            config_dir: config_dir.to_path_buf(),
            bundled_dir: bundled_dir.to_path_buf(),
            backup_folder: config_dir.join("Backup"),
            raw_folder: config_dir.join("Extracted").join("Raw"),
            themed_folder: config_dir.join("Extracted").join("Themed"),
            js_helper_dir: bundled_dir.join("jsHelper"),
            app_path,
            app_dest_path,
            prefs_path: Utf8PathBuf::from(&settings.setting.prefs_path),
            theme_folder: None,
        };

        if settings.has_theme() {
            let theme = settings.setting.current_theme.trim();
            paths.theme_folder = paths.themes().resolve(theme);
            if paths.theme_folder.is_none() {
                tracing::warn!("Theme \"{}\" not found", theme);
            }
        }

        paths
    }

    /// Folder inside the destination that receives injected files
    pub fn injection_dir(&self) -> Utf8PathBuf {
        self.app_dest_path.join("xpui")
    }

    pub fn extensions(&self) -> SearchPath {
        SearchPath::new(
            self.config_dir.join("Extensions"),
            self.bundled_dir.join("Extensions"),
        )
    }

    pub fn custom_apps(&self) -> SearchPath {
        SearchPath::new(
            self.config_dir.join("CustomApps"),
            self.bundled_dir.join("CustomApps"),
        )
    }

    pub fn themes(&self) -> SearchPath {
        SearchPath::new(self.config_dir.join("Themes"), self.bundled_dir.join("Themes"))
    }
}
