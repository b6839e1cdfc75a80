use std::rc::Rc;

use log::debug;

use crate::dates::DateCache;
use crate::error::Result;
use crate::models::Record;

/// Keep only records whose cached date is valid, preserving order
///
/// Unparsable dates are dropped silently; a record the cache has never seen
/// is an error.
pub fn filter_records(cache: &DateCache, sorted: Vec<Rc<Record>>) -> Result<Vec<Rc<Record>>> {
    let total = sorted.len();
    let mut filtered = Vec::with_capacity(total);

    for record in sorted {
        if cache.lookup(&record)?.is_valid() {
            filtered.push(record);
        }
    }

    if filtered.len() < total {
        debug!("dropped {} records with invalid dates", total - filtered.len());
    }

    Ok(filtered)
}
