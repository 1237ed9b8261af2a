/// What we know about the backup of Spotify's original assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupState {
    /// No backup was ever taken
    Empty,
    /// Backup matches the installed client version
    Current,
    /// Backup was taken from a different client version
    Outdated,
}

impl BackupState {
    pub fn is_empty(self) -> bool {
        self == BackupState::Empty
    }

    pub fn is_outdated(self) -> bool {
        self == BackupState::Outdated
    }
}

/// Layout of a Spotify `Apps` folder on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// Only packed `.spa` archives, untouched by us
    Stock,
    /// Only extracted folders, i.e. already applied
    Modified,
    /// Both archives and extracted folders; usually a client update landed on top
    Mixed,
    /// Nothing usable; a backup can never be taken from this layout
    Unbackable,
    /// Store-distributed client with a locked-down install folder
    RestrictedDistribution,
}

impl HostState {
    pub fn is_applied(self) -> bool {
        self == HostState::Modified
    }

    pub fn is_backupable(self) -> bool {
        matches!(
            self,
            HostState::Stock | HostState::Mixed | HostState::RestrictedDistribution
        )
    }

    pub fn is_mixed(self) -> bool {
        self == HostState::Mixed
    }

    pub fn is_stock(self) -> bool {
        self == HostState::Stock
    }
}

/// Which extracted tree is copied into the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetMode {
    Raw,
    Themed,
}

impl AssetMode {
    pub fn from_replace_colors(replace_colors: bool) -> Self {
        if replace_colors {
            AssetMode::Themed
        } else {
            AssetMode::Raw
        }
    }
}
