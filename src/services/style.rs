use crate::config::ColorScheme;
use camino::{Utf8Path, Utf8PathBuf};
use regex::bytes::{Captures, Regex};
use std::fs;
use std::io;

/// Stylesheet written into the injection folder
pub const USER_CSS: &str = "user.css";

/// Writes the theme stylesheet with color scheme tokens resolved.
///
/// Recognized tokens:
/// - `var(--spice-<key>)` becomes the scheme value for `<key>`
/// - `var(--spice-rgb-<key>)` becomes `r,g,b` of that value when it is a hex color
///
/// Tokens whose key is not in the scheme are left as they are. The output is
/// fully determined by the two inputs; earlier content is never merged in.
pub struct StyleInjector {
    token_pattern: Regex,
}

impl StyleInjector {
    pub fn new() -> Self {
        Self {
            token_pattern: Regex::new(r"var\(\s*--spice-(rgb-)?([A-Za-z0-9_-]+)\s*\)")
                .expect("Invalid color token regex"),
        }
    }

    /// Substitute scheme values into `css`.
    ///
    /// Works on raw bytes so stylesheets saved in a legacy encoding keep
    /// their literal content.
    pub fn render(&self, css: &[u8], scheme: Option<&ColorScheme>) -> Vec<u8> {
        let Some(scheme) = scheme else {
            return css.to_vec();
        };

        self.token_pattern
            .replace_all(css, |caps: &Captures<'_>| {
                let wants_rgb = caps.get(1).is_some();
                // the key class is ASCII only
                let Some(value) = std::str::from_utf8(&caps[2])
                    .ok()
                    .and_then(|key| scheme.get(key))
                else {
                    return caps[0].to_vec();
                };

                if wants_rgb {
                    match hex_to_rgb(value) {
                        Some((r, g, b)) => format!("{},{},{}", r, g, b).into_bytes(),
                        None => caps[0].to_vec(),
                    }
                } else {
                    normalize_color(value).into_bytes()
                }
            })
            .into_owned()
    }

    /// Write `<injection_dir>/user.css` from the optional user stylesheet and scheme.
    ///
    /// A user stylesheet that cannot be read contributes no content.
    pub fn inject(
        &self,
        injection_dir: &Utf8Path,
        user_css: Option<&Utf8Path>,
        scheme: Option<&ColorScheme>,
    ) -> io::Result<Utf8PathBuf> {
        let css = match user_css {
            Some(path) => fs::read(path).unwrap_or_else(|e| {
                tracing::warn!("Cannot read stylesheet {}: {}", path, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let rendered = self.render(&css, scheme);

        fs::create_dir_all(injection_dir)?;
        let target = injection_dir.join(USER_CSS);
        fs::write(&target, rendered)?;

        tracing::debug!("Wrote {}", target);
        Ok(target)
    }
}

impl Default for StyleInjector {
    fn default() -> Self {
        Self::new()
    }
}

/// `"1db954"` and `"#1db954"` both become `"#1db954"`; anything that is not a
/// hex color is kept verbatim.
pub fn normalize_color(value: &str) -> String {
    let trimmed = value.trim();
    match expand_hex(trimmed) {
        Some(hex) => format!("#{}", hex),
        None => trimmed.to_string(),
    }
}

/// Parse a 3 or 6 digit hex color, with or without `#`.
pub fn hex_to_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let hex = expand_hex(value.trim())?;
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn expand_hex(value: &str) -> Option<String> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => Some(digits.to_string()),
        3 => Some(digits.chars().flat_map(|c| [c, c]).collect()),
        _ => None,
    }
}
