//! Archive options
//!
//! Options are resolved once per run: [`ArchiveOptions::validate`] rejects
//! page generation without a layout before any stage runs, and
//! [`CollectionsOption::resolve`] turns the boolean-or-map `collections`
//! setting into a concrete list of collection names.

pub mod collections;
pub mod options;

pub use collections::CollectionsOption;
pub use options::ArchiveOptions;
