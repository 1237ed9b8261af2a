use camino::{Utf8Path, Utf8PathBuf};

/// Two-tier lookup: the user's folder first, then the folder bundled with
/// the executable. The first hit wins; the tiers are never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    user: Utf8PathBuf,
    bundled: Utf8PathBuf,
}

impl SearchPath {
    pub fn new(user: impl Into<Utf8PathBuf>, bundled: impl Into<Utf8PathBuf>) -> Self {
        Self {
            user: user.into(),
            bundled: bundled.into(),
        }
    }

    /// Resolve `name` to an existing file or directory.
    pub fn resolve(&self, name: &str) -> Option<Utf8PathBuf> {
        [self.user.as_path(), self.bundled.as_path()]
            .into_iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.exists())
    }

    pub fn user_dir(&self) -> &Utf8Path {
        &self.user
    }

    pub fn bundled_dir(&self) -> &Utf8Path {
        &self.bundled
    }
}
