use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use walkdir::WalkDir;

/// Predicate deciding whether a source path takes part in a copy.
pub type CopyFilter<'a> = &'a dyn Fn(&Utf8Path) -> bool;

/// Recursive directory copy.
pub trait TreeCopier {
    /// Copy the contents of `src` into `dst`, creating `dst` if needed.
    ///
    /// Existing files are replaced only when `overwrite` is set. Entries the
    /// filter rejects are skipped, and a rejected directory skips its subtree.
    fn copy(&self, src: &Utf8Path, dst: &Utf8Path, overwrite: bool, filter: Option<CopyFilter<'_>>) -> io::Result<()>;
}

/// [`TreeCopier`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCopier;

impl TreeCopier for FsCopier {
    fn copy(&self, src: &Utf8Path, dst: &Utf8Path, overwrite: bool, filter: Option<CopyFilter<'_>>) -> io::Result<()> {
        if !src.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Source folder not found: {}", src),
            ));
        }

        fs::create_dir_all(dst)?;

        let walker = WalkDir::new(src).min_depth(1).into_iter().filter_entry(|entry| {
            match (filter, Utf8Path::from_path(entry.path())) {
                (Some(accept), Some(path)) => accept(path),
                _ => true,
            }
        });

        for entry in walker {
            let entry = entry.map_err(io::Error::other)?;
            let path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Non UTF-8 path under {}", src),
                )
            })?;
            let relative = path
                .strip_prefix(src)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else if overwrite || !target.exists() {
                fs::copy(path, &target)?;
            }
        }

        tracing::debug!("Copied {} -> {}", src, dst);
        Ok(())
    }
}

/// Copy one file into `dest_dir`, keeping its file name.
pub fn copy_file(src: &Utf8Path, dest_dir: &Utf8Path) -> io::Result<Utf8PathBuf> {
    let file_name = src.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Not a file path: {}", src),
        )
    })?;

    fs::create_dir_all(dest_dir)?;
    let target = dest_dir.join(file_name);
    fs::copy(src, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        fs::create_dir_all(root.join("src/xpui/images")).unwrap();
        fs::write(root.join("src/xpui/index.html"), "new").unwrap();
        fs::write(root.join("src/xpui/images/logo.svg"), "svg").unwrap();
        (temp_dir, root)
    }

    #[test]
    fn test_copy_recursive_with_overwrite() {
        let (_temp_dir, root) = tree();
        fs::create_dir_all(root.join("dst/xpui")).unwrap();
        fs::write(root.join("dst/xpui/index.html"), "old").unwrap();

        FsCopier
            .copy(&root.join("src"), &root.join("dst"), true, None)
            .unwrap();

        assert_eq!(fs::read_to_string(root.join("dst/xpui/index.html")).unwrap(), "new");
        assert_eq!(fs::read_to_string(root.join("dst/xpui/images/logo.svg")).unwrap(), "svg");
    }

    #[test]
    fn test_copy_keeps_existing_without_overwrite() {
        let (_temp_dir, root) = tree();
        fs::create_dir_all(root.join("dst/xpui")).unwrap();
        fs::write(root.join("dst/xpui/index.html"), "old").unwrap();

        FsCopier
            .copy(&root.join("src"), &root.join("dst"), false, None)
            .unwrap();

        assert_eq!(fs::read_to_string(root.join("dst/xpui/index.html")).unwrap(), "old");
        assert!(root.join("dst/xpui/images/logo.svg").exists());
    }

    #[test]
    fn test_copy_filter_skips_subtree() {
        let (_temp_dir, root) = tree();
        let skip_images = |path: &Utf8Path| path.file_name() != Some("images");

        FsCopier
            .copy(&root.join("src"), &root.join("dst"), true, Some(&skip_images))
            .unwrap();

        assert!(root.join("dst/xpui/index.html").exists());
        assert!(!root.join("dst/xpui/images").exists());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let (_temp_dir, root) = tree();
        let err = FsCopier
            .copy(&root.join("nope"), &root.join("dst"), true, None)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_copy_file_keeps_name() {
        let (_temp_dir, root) = tree();
        let target = copy_file(&root.join("src/xpui/index.html"), &root.join("out")).unwrap();
        assert_eq!(target, root.join("out/index.html"));
        assert_eq!(fs::read_to_string(target).unwrap(), "new");
    }
}
