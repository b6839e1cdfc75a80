//! Data models for the date archive.
//!
//! - [`Record`] - One content item supplied by the host, plus the [`Files`] and
//!   [`Metadata`] maps the host owns
//! - [`PeriodBuckets`] / [`PeriodGroups`] / [`Archive`] - Grouping results
//! - [`ArchiveNode`] - Synthetic index page for one period
//!
//! Records are shared through `Rc` between the sorted sequence, the buckets and
//! the generated pages; the archive never mutates them.

pub mod archive;
pub mod node;
pub mod record;

pub use archive::{Archive, PeriodBuckets, PeriodGroups};
pub use node::ArchiveNode;
pub use record::{Files, Metadata, Record};
