use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

/// Creates `dir` and its parents if they do not exist yet.
pub fn ensure_directory<P: AsRef<Path>>(dir: P) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        log::debug!("Created directory {}", dir.display());
    }
    Ok(dir.to_path_buf())
}

/// Serializes `value` with two space indentation into `file_path`, creating the parent
/// directory first. Returns the written JSON text.
pub fn write_pretty_json<T: Serialize, P: AsRef<Path>>(file_path: P, value: &T) -> anyhow::Result<String> {
    let file_path = file_path.as_ref();
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(file_path, &json)
        .with_context(|| format!("Failed to write {}", file_path.display()))?;
    Ok(json)
}
