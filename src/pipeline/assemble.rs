use log::debug;

use super::tree::PageMap;
use crate::error::Result;
use crate::models::{Archive, Files, Metadata, Record};

pub const ARCHIVE_METADATA_KEY: &str = "archive";

/// Archive and pages converted to host values, ready to merge
///
/// Conversion happens before anything touches the host, so a failure leaves
/// the host's metadata and file map as they were.
pub struct Assembly {
    archive: Option<serde_json::Value>,
    pages: Vec<(String, Record)>,
}

impl Assembly {
    pub fn prepare(archive: &Archive, pages: &PageMap, include_metadata: bool) -> Result<Self> {
        let archive = if include_metadata { Some(serde_json::to_value(archive)?) } else { None };

        let pages = pages
            .iter()
            .map(|(key, node)| -> Result<(String, Record)> {
                let record = Record::from_value(serde_json::to_value(node.as_ref())?)?;
                Ok((key.clone(), record))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { archive, pages })
    }

    /// Merge into the host's metadata store and file map
    ///
    /// Returns whether metadata was written and how many pages were added.
    pub fn merge_into(self, files: &mut Files, metadata: &mut Metadata) -> (bool, usize) {
        let wrote_metadata = match self.archive {
            Some(archive) => {
                metadata.insert(ARCHIVE_METADATA_KEY.to_string(), archive);
                debug!("added archive metadata");
                true
            }
            None => false,
        };

        let page_count = self.pages.len();
        files.extend(self.pages);
        debug!("added {page_count} archive pages to the build");

        (wrote_metadata, page_count)
    }
}
