use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// Recoverable failure of a single extension or custom app.
///
/// The item is skipped and the batch moves on to the next one.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Extension \"{0}\" not found.")]
    ExtensionNotFound(String),

    #[error("Custom app \"{0}\" not found.")]
    AppNotFound(String),

    #[error("Custom app \"{0}\" does not have index.js")]
    MissingEntry(String),

    #[error("{name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ItemError {
    pub fn io(name: impl Into<String>, source: io::Error) -> Self {
        ItemError::Io {
            name: name.into(),
            source,
        }
    }

    /// Name of the item that failed
    pub fn item(&self) -> &str {
        match self {
            ItemError::ExtensionNotFound(name)
            | ItemError::AppNotFound(name)
            | ItemError::MissingEntry(name)
            | ItemError::Io { name, .. } => name,
        }
    }
}

/// Outcome of pushing a list of items.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in the order they were produced
    pub installed: Vec<Utf8PathBuf>,
    pub failed: Vec<ItemError>,
}

impl BatchReport {
    pub fn record(&mut self, result: Result<Vec<Utf8PathBuf>, ItemError>) {
        match result {
            Ok(files) => self.installed.extend(files),
            Err(e) => {
                tracing::error!("{}", e);
                self.failed.push(e);
            }
        }
    }

    pub fn failed_items(&self) -> Vec<&str> {
        self.failed.iter().map(ItemError::item).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
