use crate::models::BackupState;
use camino::Utf8Path;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;

static VERSION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"app\.last-launched-version\s*=\s*"([^"]+)""#).expect("Invalid prefs version regex")
});

/// Classify the backup folder against the installed client.
///
/// - `Empty` when no version was recorded or the folder holds no `.spa` archive
/// - `Current` when the recorded version equals the one in Spotify's `prefs`
/// - `Outdated` otherwise, including when `prefs` cannot be read
pub fn get(prefs_path: &Utf8Path, backup_folder: &Utf8Path, recorded_version: &str) -> BackupState {
    let recorded_version = recorded_version.trim();
    if recorded_version.is_empty() || count_archives(backup_folder) == 0 {
        return BackupState::Empty;
    }

    match read_client_version(prefs_path) {
        Some(version) if version == recorded_version => BackupState::Current,
        Some(version) => {
            tracing::debug!(
                "Backup version {} differs from client version {}",
                recorded_version,
                version
            );
            BackupState::Outdated
        }
        None => {
            tracing::warn!("Could not read client version from {}", prefs_path);
            BackupState::Outdated
        }
    }
}

/// Read `app.last-launched-version` from Spotify's `prefs` file.
pub fn read_client_version(prefs_path: &Utf8Path) -> Option<String> {
    let content = fs::read_to_string(prefs_path).ok()?;
    content
        .lines()
        .find_map(|line| VERSION_KEY.captures(line))
        .map(|caps| caps[1].to_string())
}

fn count_archives(folder: &Utf8Path) -> usize {
    let Ok(entries) = folder.read_dir_utf8() else {
        return 0;
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension() == Some("spa"))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn setup(version_in_prefs: &str, archives: &[&str]) -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let prefs = root.join("prefs");
        fs::write(
            &prefs,
            format!("language=\"en\"\napp.last-launched-version=\"{}\"\n", version_in_prefs),
        )
        .unwrap();
        let backup = root.join("Backup");
        fs::create_dir_all(&backup).unwrap();
        for archive in archives {
            fs::write(backup.join(archive), b"PK").unwrap();
        }
        (temp_dir, prefs, backup)
    }

    #[test]
    fn test_current_backup() {
        let (_temp_dir, prefs, backup) = setup("1.1.84", &["xpui.spa"]);
        assert_eq!(get(&prefs, &backup, "1.1.84"), BackupState::Current);
    }

    #[test]
    fn test_outdated_backup() {
        let (_temp_dir, prefs, backup) = setup("1.2.0", &["xpui.spa"]);
        assert_eq!(get(&prefs, &backup, "1.1.84"), BackupState::Outdated);
    }

    #[test]
    fn test_empty_without_recorded_version() {
        let (_temp_dir, prefs, backup) = setup("1.1.84", &["xpui.spa"]);
        assert_eq!(get(&prefs, &backup, ""), BackupState::Empty);
    }

    #[test]
    fn test_empty_without_archives() {
        let (_temp_dir, prefs, backup) = setup("1.1.84", &["notes.txt"]);
        assert_eq!(get(&prefs, &backup, "1.1.84"), BackupState::Empty);
    }

    #[test]
    fn test_unreadable_prefs_is_outdated() {
        let (_temp_dir, prefs, backup) = setup("1.1.84", &["xpui.spa"]);
        fs::remove_file(&prefs).unwrap();
        assert_eq!(get(&prefs, &backup, "1.1.84"), BackupState::Outdated);
    }

    #[test]
    fn test_read_client_version() {
        let (_temp_dir, prefs, _backup) = setup("1.1.84.716.gc5ee1ca2", &[]);
        assert_eq!(
            read_client_version(&prefs),
            Some("1.1.84.716.gc5ee1ca2".to_string())
        );
    }
}
