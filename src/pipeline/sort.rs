use std::rc::Rc;

use crate::dates::parse_strict;
use crate::models::{Files, Record};

/// Order the host's records most recent first
///
/// Compares the instants the dates denote, so `+09:00` and `Z` dates
/// interleave correctly. Records with a missing or unparsable date sort last.
/// Ties keep the reverse of their insertion order.
pub fn sort_records(files: &Files) -> Vec<Rc<Record>> {
    let mut sorted: Vec<Rc<Record>> = files.values().cloned().map(Rc::new).collect();
    sorted.sort_by_cached_key(|record| record.date().and_then(parse_strict));
    sorted.reverse();
    sorted
}
