use crate::services::resolve::SearchPath;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use thiserror::Error;

/// Shared dependency folder extensions may ship next to themselves
pub const SHARED_DEPENDENCY_DIR: &str = "node_modules";

/// Creates a directory link `dst` pointing at `src`.
pub trait DirLinker {
    fn link_dir(&self, src: &Utf8Path, dst: &Utf8Path) -> io::Result<()>;
}

/// Symlink on unix, directory junction on Windows. Junctions need no
/// elevated privilege or developer mode. A link already sitting at `dst` is
/// replaced; a real directory there is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformLinker;

impl DirLinker for PlatformLinker {
    fn link_dir(&self, src: &Utf8Path, dst: &Utf8Path) -> io::Result<()> {
        if is_link(dst) {
            remove_link(dst)?;
        }
        create_link(src, dst)
    }
}

#[cfg(unix)]
fn create_link(src: &Utf8Path, dst: &Utf8Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn create_link(src: &Utf8Path, dst: &Utf8Path) -> io::Result<()> {
    junction::create(src, dst)
}

#[cfg(not(any(unix, windows)))]
fn create_link(_src: &Utf8Path, _dst: &Utf8Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "directory links are not supported on this platform",
    ))
}

#[cfg(windows)]
fn is_link(dst: &Utf8Path) -> bool {
    let symlink = fs::symlink_metadata(dst)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    symlink || junction::exists(dst).unwrap_or(false)
}

#[cfg(not(windows))]
fn is_link(dst: &Utf8Path) -> bool {
    fs::symlink_metadata(dst)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}

/// Removes the link itself, never the folder it points at.
#[cfg(windows)]
fn remove_link(dst: &Utf8Path) -> io::Result<()> {
    fs::remove_dir(dst)
}

#[cfg(not(windows))]
fn remove_link(dst: &Utf8Path) -> io::Result<()> {
    fs::remove_file(dst)
}

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Cannot create node_modules link at {dst}: {source}")]
    Create {
        dst: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// No dependency folder exists; the common case
    NotFound,
    Linked { src: Utf8PathBuf, dst: Utf8PathBuf },
}

/// Link the shared dependency folder into the injection folder, if one exists.
pub fn provision(
    search: &SearchPath,
    injection_dir: &Utf8Path,
    linker: &dyn DirLinker,
) -> Result<LinkOutcome, LinkError> {
    let Some(src) = search.resolve(SHARED_DEPENDENCY_DIR) else {
        return Ok(LinkOutcome::NotFound);
    };

    tracing::info!("Found {} folder. Creating link", SHARED_DEPENDENCY_DIR);

    let dst = injection_dir.join(SHARED_DEPENDENCY_DIR);
    linker
        .link_dir(&src, &dst)
        .map_err(|source| LinkError::Create {
            dst: dst.clone(),
            source,
        })?;

    Ok(LinkOutcome::Linked { src, dst })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingLinker {
        calls: RefCell<Vec<(Utf8PathBuf, Utf8PathBuf)>>,
        fail: bool,
    }

    impl DirLinker for RecordingLinker {
        fn link_dir(&self, src: &Utf8Path, dst: &Utf8Path) -> io::Result<()> {
            self.calls
                .borrow_mut()
                .push((src.to_path_buf(), dst.to_path_buf()));
            if self.fail {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else {
                Ok(())
            }
        }
    }

    fn fixture() -> (TempDir, Utf8PathBuf, SearchPath) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(root.join("user")).unwrap();
        fs::create_dir_all(root.join("bundled")).unwrap();
        fs::create_dir_all(root.join("xpui")).unwrap();
        let search = SearchPath::new(root.join("user"), root.join("bundled"));
        (temp_dir, root, search)
    }

    #[test]
    fn test_absent_folder_is_silent_noop() {
        let (_temp_dir, root, search) = fixture();
        let linker = RecordingLinker::default();

        let outcome = provision(&search, &root.join("xpui"), &linker).unwrap();
        assert_eq!(outcome, LinkOutcome::NotFound);
        assert!(linker.calls.borrow().is_empty());
    }

    #[test]
    fn test_links_user_folder_first() {
        let (_temp_dir, root, search) = fixture();
        fs::create_dir_all(search.user_dir().join(SHARED_DEPENDENCY_DIR)).unwrap();
        fs::create_dir_all(search.bundled_dir().join(SHARED_DEPENDENCY_DIR)).unwrap();
        let linker = RecordingLinker::default();

        let outcome = provision(&search, &root.join("xpui"), &linker).unwrap();
        assert_eq!(
            outcome,
            LinkOutcome::Linked {
                src: search.user_dir().join(SHARED_DEPENDENCY_DIR),
                dst: root.join("xpui").join(SHARED_DEPENDENCY_DIR),
            }
        );
    }

    #[test]
    fn test_link_failure_is_reported() {
        let (_temp_dir, root, search) = fixture();
        fs::create_dir_all(search.bundled_dir().join(SHARED_DEPENDENCY_DIR)).unwrap();
        let linker = RecordingLinker {
            fail: true,
            ..Default::default()
        };

        let err = provision(&search, &root.join("xpui"), &linker).unwrap_err();
        assert!(err.to_string().contains("Cannot create node_modules link"));
    }

    #[test]
    fn test_platform_linker_refuses_real_directory() {
        let (_temp_dir, root, search) = fixture();
        let deps = search.user_dir().join(SHARED_DEPENDENCY_DIR);
        fs::create_dir_all(&deps).unwrap();
        let dst = root.join("xpui").join(SHARED_DEPENDENCY_DIR);
        fs::create_dir_all(dst.join("stale")).unwrap();

        assert!(PlatformLinker.link_dir(&deps, &dst).is_err());
        assert!(dst.join("stale").is_dir());
    }

    #[cfg(windows)]
    #[test]
    fn test_platform_linker_creates_junction() {
        let (_temp_dir, root, search) = fixture();
        let deps = search.user_dir().join(SHARED_DEPENDENCY_DIR);
        fs::create_dir_all(deps.join("lodash")).unwrap();
        let dst = root.join("xpui").join(SHARED_DEPENDENCY_DIR);

        PlatformLinker.link_dir(&deps, &dst).unwrap();
        PlatformLinker.link_dir(&deps, &dst).unwrap();

        assert!(junction::exists(&dst).unwrap());
        assert!(dst.join("lodash").is_dir());
        assert!(deps.join("lodash").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_platform_linker_replaces_existing_link() {
        let (_temp_dir, root, search) = fixture();
        let deps = search.user_dir().join(SHARED_DEPENDENCY_DIR);
        fs::create_dir_all(deps.join("lodash")).unwrap();
        let dst = root.join("xpui").join(SHARED_DEPENDENCY_DIR);

        PlatformLinker.link_dir(&deps, &dst).unwrap();
        PlatformLinker.link_dir(&deps, &dst).unwrap();

        assert!(fs::symlink_metadata(&dst).unwrap().file_type().is_symlink());
        assert!(dst.join("lodash").is_dir());
    }
}
