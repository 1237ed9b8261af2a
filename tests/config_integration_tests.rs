//! Integration tests for ConfigManager and derived paths
//!
//! These tests verify:
//! - Settings loading and saving
//! - Defaults when the settings file is missing
//! - Path derivation feeding the pipeline

use camino::Utf8PathBuf;
use spicetify_apply::config::{SETTINGS_FILE, load_color_scheme};
use spicetify_apply::{ConfigManager, Paths, Settings};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager_creates_directory() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("spicetify");
    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(manager.config_dir(), &nested);
    assert_eq!(manager.settings_path(), nested.join(SETTINGS_FILE));
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings().unwrap();
    assert!(settings.setting.inject_css);
    assert!(settings.setting.replace_colors);
    assert!(settings.additional.extensions.is_empty());
    assert_eq!(settings.backup.version, "");
}

#[test]
fn test_hand_written_settings_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(
        config_path.join(SETTINGS_FILE),
        r#"setting:
  spotify_path: /opt/spotify
  current_theme: Sleek
  color_scheme: Nord
  replace_colors: false
additional:
  extensions:
    - fullAppDisplay.js
    - keyboardShortcut.mjs
  custom_apps:
    - new-releases
preprocesses:
  expose_apis: true
backup:
  version: 1.2.13.661
"#,
    )
    .unwrap();

    let manager = ConfigManager::new(&config_path).unwrap();
    let settings = manager.load_settings().unwrap();

    assert_eq!(settings.setting.spotify_path, "/opt/spotify");
    assert_eq!(settings.setting.color_scheme, "Nord");
    assert!(!settings.setting.replace_colors);
    assert!(settings.setting.inject_css);
    assert_eq!(
        settings.additional.extensions,
        vec!["fullAppDisplay.js", "keyboardShortcut.mjs"]
    );
    assert_eq!(settings.additional.custom_apps, vec!["new-releases"]);
    assert!(settings.preprocesses.expose_apis);
    assert_eq!(settings.backup.version, "1.2.13.661");
}

#[test]
fn test_settings_round_trip_into_paths() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut settings = Settings::default();
    settings.setting.spotify_path = "/opt/spotify".to_string();
    settings.setting.app_dest_path = "/var/spicetify/Apps".to_string();
    manager.save_settings(&settings).unwrap();

    let loaded = manager.load_settings().unwrap();
    assert_eq!(loaded, settings);

    let paths = Paths::new(manager.config_dir(), &config_path.join("bin"), &loaded);
    assert_eq!(paths.app_path, Utf8PathBuf::from("/opt/spotify/Apps"));
    assert_eq!(
        paths.injection_dir(),
        Utf8PathBuf::from("/var/spicetify/Apps/xpui")
    );
    assert_eq!(paths.backup_folder, config_path.join("Backup"));
    assert_eq!(paths.js_helper_dir, config_path.join("bin/jsHelper"));
}

#[test]
fn test_invalid_color_scheme_file_is_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    fs::write(config_path.join("colors.yaml"), "- not\n- a map\n").unwrap();

    assert!(load_color_scheme(&config_path, "").is_err());
}
