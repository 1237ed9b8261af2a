use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// File suffix marking an extension as an ES module script.
pub const MODULE_SCRIPT_SUFFIX: &str = ".mjs";

/// Prefix of the synthetic module id given to every custom app.
pub const CUSTOM_APP_PREFIX: &str = "spicetify-routes-";

/// An extension resolved to a concrete file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub name: String,
    pub resolved_source_path: Utf8PathBuf,
    pub is_module_script: bool,
}

impl ExtensionDescriptor {
    pub fn new(name: impl Into<String>, resolved_source_path: Utf8PathBuf) -> Self {
        let name = name.into();
        let is_module_script = name.ends_with(MODULE_SCRIPT_SUFFIX);
        Self {
            name,
            resolved_source_path,
            is_module_script,
        }
    }
}

/// A single `spicetify_map{A}{B}` directive bound to the line it rewrites.
///
/// Tokens are raw bytes; extension sources are not required to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolMapping {
    pub target_line: usize,
    pub search_token: Vec<u8>,
    pub replace_token: Vec<u8>,
}

/// Parsed `manifest.json` of a custom app.
///
/// The manifest is optional. Anything that is missing, unreadable or not a
/// JSON object collapses to [`AppManifest::empty`], which serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    raw: String,
    pub subfiles: Vec<String>,
}

#[derive(Deserialize)]
struct ManifestFields {
    #[serde(default)]
    subfiles: Vec<String>,
}

impl AppManifest {
    pub fn empty() -> Self {
        Self {
            raw: "{}".to_string(),
            subfiles: Vec::new(),
        }
    }

    /// Parse manifest text, or `None` if it is not a JSON object with a
    /// well-formed `subfiles` list.
    pub fn parse(text: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        if !value.is_object() {
            return None;
        }
        let fields: ManifestFields = serde_json::from_value(value).ok()?;
        Some(Self {
            raw: text.to_string(),
            subfiles: fields.subfiles,
        })
    }

    /// Read a manifest from disk, substituting the empty manifest on any failure.
    pub fn load_or_empty(path: &Utf8Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|| {
                tracing::warn!("Invalid manifest at {}, using an empty one", path);
                Self::empty()
            }),
            Err(e) => {
                tracing::debug!("No manifest at {} ({}), using an empty one", path, e);
                Self::empty()
            }
        }
    }

    /// Manifest text as written to the destination
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl Default for AppManifest {
    fn default() -> Self {
        Self::empty()
    }
}

/// A custom app resolved to its source folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAppDescriptor {
    pub name: String,
    pub source_dir: Utf8PathBuf,
    pub manifest: AppManifest,
}

impl CustomAppDescriptor {
    /// Module id the host's loader registers the app under
    pub fn synthetic_name(&self) -> String {
        format!("{}{}", CUSTOM_APP_PREFIX, self.name)
    }

    pub fn entry_script(&self) -> Utf8PathBuf {
        self.source_dir.join("index.js")
    }

    pub fn stylesheet(&self) -> Utf8PathBuf {
        self.source_dir.join("style.css")
    }
}

/// The three files generated for one custom app.
///
/// Script and stylesheet are kept as bytes so sources in any encoding pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifacts {
    pub script: Vec<u8>,
    pub stylesheet: Vec<u8>,
    pub manifest_json: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_script_detection() {
        let ext = ExtensionDescriptor::new("keyboard.mjs", Utf8PathBuf::from("/x/keyboard.mjs"));
        assert!(ext.is_module_script);

        let ext = ExtensionDescriptor::new("keyboard.js", Utf8PathBuf::from("/x/keyboard.js"));
        assert!(!ext.is_module_script);
    }

    #[test]
    fn test_manifest_parse_keeps_raw_text() {
        let text = r#"{ "subfiles": ["a.js", "b.js"], "icon": "x" }"#;
        let manifest = AppManifest::parse(text).unwrap();
        assert_eq!(manifest.subfiles, vec!["a.js", "b.js"]);
        assert_eq!(manifest.raw(), text);
    }

    #[test]
    fn test_manifest_without_subfiles() {
        let manifest = AppManifest::parse(r#"{"name":"x"}"#).unwrap();
        assert!(manifest.subfiles.is_empty());
    }

    #[test]
    fn test_manifest_rejects_non_objects() {
        assert!(AppManifest::parse("[[\"a.js\"]]").is_none());
        assert!(AppManifest::parse("not json").is_none());
        assert!(AppManifest::parse(r#"{"subfiles": "a.js"}"#).is_none());
    }

    #[test]
    fn test_empty_manifest_is_braces() {
        assert_eq!(AppManifest::empty().raw(), "{}");
        assert_eq!(AppManifest::default(), AppManifest::empty());
    }

    #[test]
    fn test_synthetic_name() {
        let app = CustomAppDescriptor {
            name: "lyrics".to_string(),
            source_dir: Utf8PathBuf::from("/apps/lyrics"),
            manifest: AppManifest::empty(),
        };
        assert_eq!(app.synthetic_name(), "spicetify-routes-lyrics");
        assert_eq!(app.entry_script(), Utf8PathBuf::from("/apps/lyrics/index.js"));
    }
}
