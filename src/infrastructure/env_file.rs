//! `.env` file reading and writing
//!
//! Format: one `KEY=value` per line; blank lines and `#` comments are skipped;
//! the value is everything after the first `=`, with one pair of surrounding
//! single or double quotes stripped.

use std::fs;
use std::path::Path;

use crate::error::ShipitResult;
use crate::infrastructure::fs::write_safe_file;

/// Parse `.env` content into ordered `(key, value)` pairs.
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    content.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim().trim_start_matches("export ").trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), strip_quotes(value.trim()).to_string()))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Read and parse an env file; a missing file yields no entries.
pub fn read_env_file(path: &Path) -> ShipitResult<Vec<(String, String)>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse_env(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Look `key` up across env files in order; the first file giving it a
/// non-empty value wins. `KEY=` counts as unset.
pub fn lookup(root: &Path, files: &[&str], key: &str) -> Option<String> {
    files.iter().find_map(|file| {
        read_env_file(&root.join(file))
            .ok()?
            .into_iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v)
    })
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '#')
}

fn format_entry(key: &str, value: &str) -> String {
    if needs_quotes(value) {
        format!("{}=\"{}\"", key, value)
    } else {
        format!("{}={}", key, value)
    }
}

/// Write entries into `relative` under `root`, keeping every other line.
///
/// A key with a non-empty value in the file is left alone. An empty
/// assignment (`KEY=`) is replaced in place; anything else is appended.
/// Returns the keys actually written.
pub fn append_env_entries(
    root: &Path,
    relative: &str,
    entries: &[(String, String)],
) -> ShipitResult<Vec<String>> {
    let path = root.join(relative);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let mut written = Vec::new();
    for (key, value) in entries {
        let assignments: Vec<(usize, String)> = lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| {
                parse_line(line)
                    .filter(|(k, _)| k == key)
                    .map(|(_, v)| (i, v))
            })
            .collect();

        if assignments.iter().any(|(_, v)| !v.is_empty()) {
            continue;
        }
        match assignments.first() {
            Some((index, _)) => lines[*index] = format_entry(key, value),
            None => lines.push(format_entry(key, value)),
        }
        written.push(key.clone());
    }

    if !written.is_empty() {
        let mut updated = lines.join("\n");
        updated.push('\n');
        write_safe_file(relative, &updated, root)?;
    }
    Ok(written)
}
