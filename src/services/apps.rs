use crate::models::{AppManifest, CompiledArtifacts, CustomAppDescriptor};
use crate::services::item::{BatchReport, ItemError};
use crate::services::resolve::SearchPath;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Wrap a script in the webpack chunk shape the client's module loader expects.
///
/// The output must match the loader byte for byte apart from `id` and `script`.
pub fn wrap_chunk(id: &str, script: &[u8]) -> Vec<u8> {
    let head = format!(
        r#"(("undefined"!=typeof self?self:global).webpackChunkopen=("undefined"!=typeof self?self:global).webpackChunkopen||[])
.push([["{id}"],{{"{id}":(e,t,n)=>{{
"use strict";n.r(t),n.d(t,{{default:()=>render}});
"#
    );
    let tail = "\n}}]);";

    let mut chunk = Vec::with_capacity(head.len() + script.len() + tail.len());
    chunk.extend_from_slice(head.as_bytes());
    chunk.extend_from_slice(script);
    chunk.extend_from_slice(tail.as_bytes());
    chunk
}

/// Builds custom apps into `<id>.js`, `<id>.css` and `<id>.json` triads.
pub struct AppBundler<'a> {
    search: &'a SearchPath,
}

impl<'a> AppBundler<'a> {
    pub fn new(search: &'a SearchPath) -> Self {
        Self { search }
    }

    /// Locate the app folder and read its manifest.
    pub fn resolve(&self, name: &str) -> Result<CustomAppDescriptor, ItemError> {
        let source_dir = self
            .search
            .resolve(name)
            .ok_or_else(|| ItemError::AppNotFound(name.to_string()))?;
        let manifest = AppManifest::load_or_empty(&source_dir.join(MANIFEST_FILE));

        Ok(CustomAppDescriptor {
            name: name.to_string(),
            source_dir,
            manifest,
        })
    }

    /// Produce the three artifacts in memory. Nothing is written here, so an
    /// app without an entry script leaves no partial output behind.
    ///
    /// Sources are read as bytes and never decoded.
    pub fn compile(&self, app: &CustomAppDescriptor) -> Result<CompiledArtifacts, ItemError> {
        let entry = app.entry_script();
        let mut script = fs::read(&entry).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ItemError::MissingEntry(app.name.clone()),
            _ => ItemError::io(&app.name, e),
        })?;

        for subfile in &app.manifest.subfiles {
            let path = app.source_dir.join(subfile);
            match fs::read(&path) {
                Ok(content) => {
                    script.push(b'\n');
                    script.extend_from_slice(&content);
                }
                Err(e) => tracing::debug!("Skipping subfile {}: {}", path, e),
            }
        }

        let stylesheet = fs::read(app.stylesheet()).unwrap_or_default();

        Ok(CompiledArtifacts {
            script: wrap_chunk(&app.synthetic_name(), &script),
            stylesheet,
            manifest_json: app.manifest.raw().to_string(),
        })
    }

    /// Build and write one app.
    ///
    /// The triad is all or nothing: if any file fails to write, the files
    /// already written for this app are removed again.
    pub fn push(&self, name: &str, injection_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ItemError> {
        let app = self.resolve(name)?;
        let artifacts = self.compile(&app)?;
        let id = app.synthetic_name();

        fs::create_dir_all(injection_dir).map_err(|e| ItemError::io(name, e))?;

        let outputs: [(String, &[u8]); 3] = [
            (format!("{}.json", id), artifacts.manifest_json.as_bytes()),
            (format!("{}.js", id), &artifacts.script),
            (format!("{}.css", id), &artifacts.stylesheet),
        ];

        let mut written = Vec::with_capacity(outputs.len());
        for (file_name, content) in outputs {
            let target = injection_dir.join(file_name);
            if let Err(e) = fs::write(&target, content) {
                discard(&written);
                return Err(ItemError::io(name, e));
            }
            written.push(target);
        }

        tracing::info!("Installed custom app {}", name);
        Ok(written)
    }

    /// Push every app in order. Failures are recorded and skipped.
    pub fn push_all(&self, names: &[String], injection_dir: &Utf8Path) -> BatchReport {
        let mut report = BatchReport::default();
        for name in names {
            report.record(self.push(name, injection_dir));
        }
        report
    }
}

fn discard(files: &[Utf8PathBuf]) {
    for file in files {
        if let Err(e) = fs::remove_file(file) {
            tracing::warn!("Cannot remove partial output {}: {}", file, e);
        }
    }
}
