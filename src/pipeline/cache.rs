use std::rc::Rc;

use log::debug;

use crate::dates::DateCache;
use crate::models::Record;

/// Parse every record date once, handing the sequence through unchanged
pub fn cache_dates(sorted: Vec<Rc<Record>>) -> (DateCache, Vec<Rc<Record>>) {
    let mut cache = DateCache::new();
    for record in &sorted {
        cache.parse(record.date());
    }

    debug!(
        "cached {} distinct dates for {} records ({} valid)",
        cache.len(),
        sorted.len(),
        cache.valid_count()
    );

    (cache, sorted)
}
