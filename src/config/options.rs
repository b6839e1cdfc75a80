use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::collections::CollectionsOption;
use crate::error::{ArchiveError, Result};

const DEFAULT_INDEX_NAME: &str = "index";

/// User-facing archive options
///
/// Every key is optional. Keys are camelCase in JSON (`rootLevel`,
/// `indexName`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchiveOptions {
    /// Layout identifier attached to every generated page
    pub layout: Option<String>,
    /// Expose the archive under the `archive` metadata key
    #[serde(deserialize_with = "deserialize_flag")]
    pub metadata: bool,
    /// Generate pages for the root (all records) scope
    #[serde(deserialize_with = "deserialize_flag")]
    pub root_level: bool,
    /// Collection scopes to archive and generate pages for
    pub collections: CollectionsOption,
    /// Last path segment of generated page keys
    #[serde(deserialize_with = "deserialize_index_name")]
    pub index_name: String,
}

/// Boolean flag where `null` means the default `true`
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

fn deserialize_index_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()))
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            layout: None,
            metadata: true,
            root_level: true,
            collections: CollectionsOption::Enabled,
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

impl ArchiveOptions {
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ArchiveError::configuration(format!("invalid archive options: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| ArchiveError::io(path, e))?;
        serde_json::from_str(&json).map_err(|e| {
            ArchiveError::configuration(format!(
                "invalid archive options in {}: {e}",
                path.display()
            ))
        })
    }

    /// Whether any scope will produce pages
    pub fn generates_pages(&self) -> bool {
        self.root_level || self.collections.is_enabled()
    }

    /// Configured layout, treating an empty string as missing
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref().filter(|layout| !layout.is_empty())
    }

    /// Check the options before any stage runs
    pub fn validate(&self) -> Result<()> {
        if self.generates_pages() && self.layout().is_none() {
            return Err(ArchiveError::configuration(
                "layout must be defined for generated archives",
            ));
        }

        if self.index_name.is_empty() || self.index_name.contains('/') {
            return Err(ArchiveError::configuration(format!(
                "indexName must be a single path segment, got {:?}",
                self.index_name
            )));
        }

        Ok(())
    }
}
