use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;

use crate::branding::Branding;

pub fn parse_os_release(path: impl AsRef<Path>) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = std::io::BufReader::new(file);
    parse_os_release_from_reader(reader)
}

pub fn parse_os_release_from_reader<R: BufRead>(reader: R) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for line_result in reader.lines() {
        let raw = line_result?;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            let v = v.trim().trim_matches('"').trim_matches('\'');
            map.insert(k.trim().to_string(), v.to_string());
        }
    }
    Ok(map)
}

/// Result of branding an os-release document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Keys whose values were overwritten, in file order.
    pub replaced: Vec<String>,
}

/// Rewrites os-release text, replacing the values of branded keys.
///
/// Comments, blank lines and anything without `=` are copied as-is. The key is
/// everything before the first `=`; the rest of the line is dropped when the key
/// is replaced. Output is always `\n`-separated with one trailing newline.
pub fn rewrite_content(content: &str, branding: &Branding) -> Rewrite {
    let mut lines = Vec::new();
    let mut replaced = Vec::new();

    for line in content.lines() {
        if line.starts_with('#') {
            lines.push(line.to_string());
            continue;
        }
        let Some((key, _)) = line.split_once('=') else {
            lines.push(line.to_string());
            continue;
        };
        match branding.replacement(key) {
            Some(value) => {
                tracing::debug!(key, value, "replacing os-release entry");
                lines.push(format!("{key}=\"{value}\""));
                replaced.push(key.to_string());
            }
            None => lines.push(line.to_string()),
        }
    }

    let mut content = lines.join("\n");
    content.push('\n');
    Rewrite { content, replaced }
}

/// Brands the os-release file at `path` in place.
///
/// Returns `Ok(None)` without touching anything when the file does not exist.
pub fn rewrite_file(path: &Path, branding: &Branding) -> Result<Option<Rewrite>> {
    let original = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "os-release not found, leaving it alone");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let rewrite = rewrite_content(&original, branding);
    std::fs::write(path, &rewrite.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        replaced = ?rewrite.replaced,
        "rewrote os-release"
    );
    Ok(Some(rewrite))
}
