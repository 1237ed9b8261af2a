use crate::models::{ExtensionDescriptor, SymbolMapping};
use crate::services::copy::copy_file;
use crate::services::item::{BatchReport, ItemError};
use crate::services::resolve::SearchPath;
use camino::{Utf8Path, Utf8PathBuf};
use regex::bytes::Regex;
use std::fs;
use std::io;

/// Rewrites module scripts according to `// spicetify_map{A}{B}` directives.
///
/// A directive replaces the first `A` on the line right after it with `B`.
/// Scanning is two-pass: directives are collected from the untouched content
/// first, then applied, so each directive only ever sees its own target line.
/// A directive on the last line has nothing to rewrite and is ignored.
///
/// Content is handled as bytes. Scripts in legacy encodings keep every byte
/// outside the rewritten token.
pub struct SymbolMapper {
    directive: Regex,
}

impl SymbolMapper {
    pub fn new() -> Self {
        Self {
            directive: Regex::new(r"//\s*spicetify_map\{(.+?)\}\{(.+?)\}")
                .expect("Invalid symbol map regex"),
        }
    }

    /// Pass one: find directives and the line each one targets.
    pub fn scan(&self, lines: &[&[u8]]) -> Vec<SymbolMapping> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                let caps = self.directive.captures(line)?;
                let target_line = index + 1;
                if target_line >= lines.len() {
                    tracing::debug!("Symbol map directive on last line {} ignored", index + 1);
                    return None;
                }
                Some(SymbolMapping {
                    target_line,
                    search_token: caps[1].to_vec(),
                    replace_token: caps[2].to_vec(),
                })
            })
            .collect()
    }

    /// Pass two: apply every mapping to its target line.
    pub fn apply(&self, content: &[u8]) -> Vec<u8> {
        let original: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
        let mappings = self.scan(&original);
        if mappings.is_empty() {
            return content.to_vec();
        }

        let mut lines: Vec<Vec<u8>> = original.iter().map(|line| line.to_vec()).collect();
        for mapping in &mappings {
            let line = &mut lines[mapping.target_line];
            if let Some(rewritten) =
                replace_first(line, &mapping.search_token, &mapping.replace_token)
            {
                *line = rewritten;
            }
        }

        lines.join(&b'\n')
    }
}

impl Default for SymbolMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte counterpart of `str::replacen(.., 1)`. `None` when `search` does not occur.
fn replace_first(line: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    if search.is_empty() {
        return None;
    }
    let start = line
        .windows(search.len())
        .position(|window| window == search)?;

    let mut out = Vec::with_capacity(line.len() - search.len() + replace.len());
    out.extend_from_slice(&line[..start]);
    out.extend_from_slice(replace);
    out.extend_from_slice(&line[start + search.len()..]);
    Some(out)
}

/// Copies extension scripts into the injection folder.
pub struct ExtensionInjector<'a> {
    search: &'a SearchPath,
    mapper: SymbolMapper,
}

impl<'a> ExtensionInjector<'a> {
    pub fn new(search: &'a SearchPath) -> Self {
        Self {
            search,
            mapper: SymbolMapper::new(),
        }
    }

    /// Absolute paths are taken as-is; bare names go through the search path.
    pub fn resolve(&self, name: &str) -> Result<ExtensionDescriptor, ItemError> {
        let as_path = Utf8Path::new(name);
        if as_path.is_absolute() {
            let display_name = as_path.file_name().unwrap_or(name);
            return Ok(ExtensionDescriptor::new(display_name, as_path.to_path_buf()));
        }

        self.search
            .resolve(name)
            .map(|path| ExtensionDescriptor::new(name, path))
            .ok_or_else(|| ItemError::ExtensionNotFound(name.to_string()))
    }

    /// Push every extension in order. Failures are recorded and skipped.
    pub fn push_all(&self, names: &[String], injection_dir: &Utf8Path) -> BatchReport {
        let mut report = BatchReport::default();
        for name in names {
            report.record(self.push(name, injection_dir).map(|path| vec![path]));
        }
        report
    }

    /// Push one extension, rewriting it when it is a module script.
    ///
    /// Module scripts are remapped in memory and written once, so a failed
    /// read never leaves an unmapped copy in the injection folder.
    pub fn push(&self, name: &str, injection_dir: &Utf8Path) -> Result<Utf8PathBuf, ItemError> {
        let extension = self.resolve(name)?;

        let target = if extension.is_module_script {
            self.write_remapped(&extension, injection_dir)
        } else {
            copy_file(&extension.resolved_source_path, injection_dir)
        }
        .map_err(|e| ItemError::io(&extension.name, e))?;

        tracing::info!("Installed extension {}", extension.name);
        Ok(target)
    }

    fn write_remapped(
        &self,
        extension: &ExtensionDescriptor,
        injection_dir: &Utf8Path,
    ) -> io::Result<Utf8PathBuf> {
        let source = &extension.resolved_source_path;
        let file_name = source.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", source),
            )
        })?;

        let content = fs::read(source)?;
        let remapped = self.mapper.apply(&content);
        if remapped != content {
            tracing::debug!("Remapped symbols in {}", source);
        }

        fs::create_dir_all(injection_dir)?;
        let target = injection_dir.join(file_name);
        fs::write(&target, remapped)?;
        Ok(target)
    }
}
