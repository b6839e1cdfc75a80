//! Date archive pipeline
//!
//! Stages run strictly in order, each consuming the previous stage's output:
//!
//! 1. [`sort_records`] - most recent first
//! 2. [`cache_dates`] - parse each distinct raw date once
//! 3. [`filter_records`] - drop records with unparsable dates
//! 4. [`archive_records`] - year/month/day buckets, per selected collection too
//! 5. [`build_pages`] - one synthetic page per bucket, linked to its children
//! 6. [`Assembly`] - merge into the host's metadata and file map
//!
//! [`collect_archive`] runs stages 1-4 alone, for callers that only need the
//! grouping.
//!
//! # Error Handling Strategy
//!
//! - **Configuration**: options are validated before any stage runs; page
//!   generation without a layout fails with [`ArchiveError::Configuration`].
//! - **Structural input errors**: malformed host data (a `collection` field that
//!   is neither a name nor a list of names, a non-object `collections`
//!   metadata entry) fails with [`ArchiveError::InvalidArgument`].
//! - **Bad dates are not errors**: they are dropped by the filter stage.
//! - **No partial output**: the host is only touched once every stage has
//!   succeeded.
//!
//! [`ArchiveError::Configuration`]: crate::error::ArchiveError::Configuration
//! [`ArchiveError::InvalidArgument`]: crate::error::ArchiveError::InvalidArgument

pub mod assemble;
pub mod cache;
pub mod filter;
pub mod group;
pub mod sort;
pub mod tree;

pub use assemble::{ARCHIVE_METADATA_KEY, Assembly};
pub use cache::cache_dates;
pub use filter::filter_records;
pub use group::{archive_records, group_periods, known_collections};
pub use sort::sort_records;
pub use tree::{PageMap, PageSettings, build_nodes, build_pages};

use log::debug;

use crate::config::{ArchiveOptions, CollectionsOption};
use crate::dates::DateCache;
use crate::error::Result;
use crate::host::Plugin;
use crate::models::{Archive, Files, Metadata};

/// What one archive run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Records seen in the host file map
    pub records: usize,
    /// Records with a valid date
    pub archived: usize,
    /// Collections that received their own scope
    pub collections: Vec<String>,
    /// Pages added to the host file map
    pub pages: usize,
    pub metadata_written: bool,
}

/// Records sorted, filtered and grouped, before any page exists
#[derive(Debug)]
pub struct CollectedArchive {
    pub cache: DateCache,
    pub archive: Archive,
    /// Records seen in the host file map
    pub records: usize,
    /// Records with a valid date
    pub archived: usize,
}

/// Run the stages up to grouping without touching the host
///
/// `collections` is resolved against the collections the host's metadata
/// knows about.
///
/// # Errors
///
/// Returns an error if the host's records or `collections` metadata are
/// malformed.
pub fn collect_archive(
    files: &Files,
    metadata: &Metadata,
    collections: &CollectionsOption,
) -> Result<CollectedArchive> {
    let selected = collections.resolve(&known_collections(metadata)?);

    let sorted = sort_records(files);
    let records = sorted.len();
    let (cache, sorted) = cache_dates(sorted);
    let filtered = filter_records(&cache, sorted)?;
    let archive = archive_records(&cache, &filtered, &selected)?;

    Ok(CollectedArchive { cache, archive, records, archived: filtered.len() })
}

/// Run the whole pipeline against the host's file map and metadata
///
/// # Errors
///
/// Returns an error if:
/// - Pages are requested without a layout, or `indexName` is not a single
///   path segment (nothing runs)
/// - The host's records or `collections` metadata are malformed
///
/// On error the host's file map and metadata are left untouched.
pub fn run_archive(
    files: &mut Files,
    metadata: &mut Metadata,
    options: &ArchiveOptions,
) -> Result<ArchiveSummary> {
    options.validate()?;

    if options.root_level {
        debug!("creating root-level archive files");
    }
    if options.collections.is_enabled() {
        debug!("creating configured collections archive files");
    }
    if options.metadata {
        debug!("adding archive metadata");
    }

    let CollectedArchive { cache, archive, records, archived } =
        collect_archive(files, metadata, &options.collections)?;

    let settings = PageSettings {
        layout: options.layout().unwrap_or_default(),
        index_name: &options.index_name,
        root_level: options.root_level,
        collections: options.collections.is_enabled(),
    };
    let pages = build_pages(&cache, &archive, &settings)?;

    let assembly = Assembly::prepare(&archive, &pages, options.metadata)?;
    let (metadata_written, pages) = assembly.merge_into(files, metadata);

    Ok(ArchiveSummary {
        records,
        archived,
        collections: archive.collection_names().map(str::to_string).collect(),
        pages,
        metadata_written,
    })
}

/// The archive pipeline packaged as a build plugin
#[derive(Debug, Clone, Default)]
pub struct ArchivePlugin {
    options: ArchiveOptions,
}

impl ArchivePlugin {
    pub fn new(options: ArchiveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }
}

impl Plugin for ArchivePlugin {
    fn name(&self) -> &str {
        "archive"
    }

    fn run(&self, files: &mut Files, metadata: &mut Metadata) -> Result<()> {
        let summary = run_archive(files, metadata, &self.options)?;
        debug!(
            "archived {} of {} records into {} pages",
            summary.archived, summary.records, summary.pages
        );
        Ok(())
    }
}
