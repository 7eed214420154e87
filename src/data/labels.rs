use std::{fs, io};
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;

use crate::common::DEFAULT_LABELS;

/// Reads one label per line. Lines are trimmed and blank lines are skipped.
///
/// A missing file is not an error: a warning is logged and the two placeholder labels are
/// returned. Any other read failure is propagated.
pub fn parse_labels_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Vec<String>> {
    let file_path = file_path.as_ref();
    match file_to_labels(file_path) {
        Ok(labels) => {
            log::info!("Loaded {} labels from {}", labels.len(), file_path.display());
            Ok(labels)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!("{} not found. Using default labels.", file_path.display());
            Ok(DEFAULT_LABELS.iter().map(|x| x.to_string()).collect())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read labels from {}", file_path.display())),
    }
}

fn file_to_labels(file_path: &Path) -> io::Result<Vec<String>> {
    let file_in = fs::File::open(file_path)?;
    let file_reader = BufReader::new(file_in);
    let mut labels = Vec::new();
    for line in file_reader.lines() {
        let line = line?;
        let label = line.trim();
        if !label.is_empty() {
            labels.push(label.to_string());
        }
    }
    Ok(labels)
}
