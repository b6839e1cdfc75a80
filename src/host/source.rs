use std::fs;
use std::path::Path;

use log::{debug, warn};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{ArchiveError, Result};
use crate::models::{Files, Record};

const RECORD_EXTENSION: &str = "json";

/// Load every `*.json` record under `source` into a file map
///
/// Keys are paths relative to `source` with `/` separators, inserted in
/// sorted order so repeated loads produce the same map. Hidden files and
/// directories are skipped. Files are read and parsed in parallel.
///
/// # Errors
///
/// Returns an error if:
/// - `source` is not a readable directory
/// - A record file cannot be read or is not valid JSON
/// - A record file holds something other than a JSON object
pub fn load_source(source: &Path) -> Result<Files> {
    if !source.is_dir() {
        return Err(ArchiveError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source directory not found"),
        ));
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(source).into_iter().filter_entry(|entry| {
        entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable source entry: {e}");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
        {
            paths.push(path.to_path_buf());
        }
    }

    let mut records = paths
        .par_iter()
        .map(|path| -> Result<(String, Record)> {
            Ok((relative_key(source, path), read_record(path)?))
        })
        .collect::<Result<Vec<(String, Record)>>>()?;
    records.sort_by(|a, b| a.0.cmp(&b.0));

    debug!("loaded {} records from {}", records.len(), source.display());
    Ok(records.into_iter().collect())
}

fn read_record(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path).map_err(|e| ArchiveError::io(path, e))?;
    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
        ArchiveError::invalid_argument(format!("{} is not valid JSON: {e}", path.display()))
    })?;

    Record::from_value(value).map_err(|e| match e {
        ArchiveError::InvalidArgument(message) => {
            ArchiveError::InvalidArgument(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

fn relative_key(source: &Path, path: &Path) -> String {
    path.strip_prefix(source)
        .unwrap_or(path)
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
