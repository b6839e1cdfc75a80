//! Period Archive - Group dated content records into calendar archives
//!
//! This library takes the records of a content build (posts, articles, events),
//! groups them into year, month and day periods, and produces:
//!
//! - An archive tree (`years` / `months` / `days`, optionally per collection)
//!   exposed to the host under the `archive` metadata key
//! - One synthetic index page per period, carrying its records, a layout
//!   identifier and links to the next finer periods
//!
//! # Example
//!
//! ```
//! use period_archive::{ArchiveOptions, Files, Metadata, Record, run_archive};
//!
//! let mut files = Files::new();
//! files.insert(
//!     "posts/hello.json".to_string(),
//!     Record::new().with_field("date", "2017-01-01T00:00:00.000Z"),
//! );
//! let mut metadata = Metadata::new();
//!
//! let options = ArchiveOptions::default().with_layout("archive.html");
//! run_archive(&mut files, &mut metadata, &options)?;
//!
//! assert!(files.contains_key("2017/01/01/index"));
//! assert!(metadata["archive"]["years"].get("2017").is_some());
//! # Ok::<(), period_archive::ArchiveError>(())
//! ```

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod host;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use config::{ArchiveOptions, CollectionsOption};
pub use dates::{DateCache, ParsedDate, Period};
pub use error::ArchiveError;
pub use host::{Build, CollectionsPlugin, Plugin};
pub use models::{Archive, ArchiveNode, Files, Metadata, PeriodBuckets, PeriodGroups, Record};
pub use pipeline::{ArchivePlugin, ArchiveSummary, run_archive};
