use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::error::{ArchiveError, Result};
use crate::models::{Files, Metadata};

pub const METADATA_FILENAME: &str = "metadata.json";
const OUTPUT_EXTENSION: &str = "json";

/// Write every file map entry and the metadata store under `destination`
///
/// Each entry is written as pretty-printed JSON at its key, with a `.json`
/// extension added to keys that have none (generated pages such as
/// `2017/01/index`). Metadata goes to `metadata.json`.
///
/// Returns the number of files written, metadata included.
///
/// # Errors
///
/// Returns an error if a key would escape `destination` (absolute paths or
/// `..` components) or if a file cannot be written.
pub fn write_destination(destination: &Path, files: &Files, metadata: &Metadata) -> Result<usize> {
    let mut targets = Vec::with_capacity(files.len());
    for key in files.keys() {
        targets.push(output_path(destination, key)?);
    }

    for (target, record) in targets.iter().zip(files.values()) {
        write_json(target, &serde_json::to_string_pretty(record)?)?;
    }

    let metadata_path = destination.join(METADATA_FILENAME);
    write_json(&metadata_path, &serde_json::to_string_pretty(metadata)?)?;

    debug!("wrote {} files to {}", targets.len() + 1, destination.display());
    Ok(targets.len() + 1)
}

/// Resolve a file map key to a path inside `destination`
fn output_path(destination: &Path, key: &str) -> Result<PathBuf> {
    let relative = Path::new(key);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if key.is_empty() || escapes {
        return Err(ArchiveError::invalid_argument(format!(
            "refusing to write {key:?} outside the destination directory"
        )));
    }

    let mut path = destination.join(relative);
    if path.extension().is_none() {
        path.set_extension(OUTPUT_EXTENSION);
    }
    Ok(path)
}

fn write_json(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ArchiveError::io(path, e))
}
