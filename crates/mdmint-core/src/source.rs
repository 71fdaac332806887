// record sources: JSON, JSON Lines and YAML files, or directories of them

use crate::record::Record;
use anyhow::{bail, Context, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson", "yaml", "yml"];

/// Expand an input path into record files.
///
/// Files are returned as-is; directories are walked recursively and only
/// files with a known extension are kept, sorted by path.
pub fn discover_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.exists() {
        bail!("Input not found: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        if entry.file_type().is_file() && extension_of(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Load every record from one source file, choosing the format by extension.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let Some(extension) = extension_of(path) else {
        bail!(
            "Unsupported record source {} (expected one of: {})",
            path.display(),
            SOURCE_EXTENSIONS.join(", ")
        );
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let records = match extension.as_str() {
        "json" => parse_json(&content),
        "jsonl" | "ndjson" => parse_json_lines(&content),
        _ => parse_yaml(&content),
    };
    records.with_context(|| format!("Failed to load records from {}", path.display()))
}

/// A single object or an array of objects
pub fn parse_json(content: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(content).context("Invalid JSON")?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Record::from_json(item).with_context(|| format!("Record #{}", i + 1)))
            .collect(),
        other => Ok(vec![Record::from_json(other)?]),
    }
}

/// One object per line; blank lines are skipped
pub fn parse_json_lines(content: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value =
            serde_json::from_str(line).with_context(|| format!("Invalid JSON on line {}", i + 1))?;
        records.push(Record::from_json(value).with_context(|| format!("Line {}", i + 1))?);
    }
    Ok(records)
}

/// A single mapping or a sequence of mappings
pub fn parse_yaml(content: &str) -> Result<Vec<Record>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_yaml::from_str(content).context("Invalid YAML")?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Record::from_yaml(item).with_context(|| format!("Record #{}", i + 1)))
            .collect(),
        other => Ok(vec![Record::from_yaml(other)?]),
    }
}

fn extension_of(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    SOURCE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}
