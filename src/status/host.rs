use crate::models::HostState;
use camino::Utf8Path;

/// Classify an `Apps` folder by its layout.
///
/// Packed `.spa` archives are what Spotify ships; extracted folders are
/// what the pipeline leaves behind.
pub fn get(path: &Utf8Path) -> HostState {
    let Ok(entries) = path.read_dir_utf8() else {
        return HostState::Unbackable;
    };

    let mut archives = 0usize;
    let mut extracted = 0usize;
    for entry in entries.filter_map(Result::ok) {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            extracted += 1;
        } else if entry.path().extension() == Some("spa") {
            archives += 1;
        }
    }

    match (archives > 0, extracted > 0) {
        (true, false) => HostState::Stock,
        (false, true) => HostState::Modified,
        (true, true) => HostState::Mixed,
        (false, false) => HostState::Unbackable,
    }
}

/// Classify the installed client, folding in store distribution.
///
/// A store install that is not already applied reports
/// [`HostState::RestrictedDistribution`].
pub fn get_install(path: &Utf8Path, windows_store: bool) -> HostState {
    let state = get(path);
    if windows_store && !state.is_applied() {
        HostState::RestrictedDistribution
    } else {
        state
    }
}
