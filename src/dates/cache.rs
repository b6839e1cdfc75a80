use std::collections::HashMap;

use super::parse::ParsedDate;
use crate::error::{ArchiveError, Result};
use crate::models::Record;

/// Parsed dates for one archive run, keyed by raw date string
///
/// Each distinct raw string is parsed at most once. Records without a string
/// date share the entry for the empty string, which is always invalid.
#[derive(Debug, Default)]
pub struct DateCache {
    entries: HashMap<String, ParsedDate>,
    parses: usize,
}

impl DateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached parse for `raw`, parsing it on first sight
    pub fn parse(&mut self, raw: Option<&str>) -> ParsedDate {
        let key = raw.unwrap_or_default();
        if let Some(parsed) = self.entries.get(key) {
            return *parsed;
        }

        self.parses += 1;
        let parsed = ParsedDate::parse(key);
        self.entries.insert(key.to_string(), parsed);
        parsed
    }

    pub fn get(&self, raw: Option<&str>) -> Option<&ParsedDate> {
        self.entries.get(raw.unwrap_or_default())
    }

    /// Cached date for `record`
    ///
    /// A miss means the record never went through the caching stage, which is
    /// a wiring error rather than a bad date.
    pub fn lookup(&self, record: &Record) -> Result<&ParsedDate> {
        self.get(record.date()).ok_or_else(|| {
            ArchiveError::invalid_argument(format!(
                "cached dates must be defined for every record (missing {:?})",
                record.date().unwrap_or_default()
            ))
        })
    }

    /// Number of distinct raw strings held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the underlying parser actually ran
    pub fn parse_count(&self) -> usize {
        self.parses
    }

    pub fn valid_count(&self) -> usize {
        self.entries.values().filter(|parsed| parsed.is_valid()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_each_raw_string_once() {
        let mut cache = DateCache::new();
        let first = cache.parse(Some("2017-01-01T00:00:00.000Z"));
        let second = cache.parse(Some("2017-01-01T00:00:00.000Z"));

        assert_eq!(first, second);
        assert_eq!(cache.parse_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalid_dates_are_cached_too() {
        let mut cache = DateCache::new();
        assert!(!cache.parse(Some("not-a-date")).is_valid());
        assert!(!cache.parse(Some("not-a-date")).is_valid());
        assert_eq!(cache.parse_count(), 1);
        assert_eq!(cache.valid_count(), 0);
    }

    #[test]
    fn test_missing_date_shares_empty_entry() {
        let mut cache = DateCache::new();
        cache.parse(None);
        cache.parse(Some(""));
        assert_eq!(cache.len(), 1);
        assert!(!cache.lookup(&Record::new()).unwrap().is_valid());
    }

    #[test]
    fn test_lookup_miss_is_invalid_argument() {
        let cache = DateCache::new();
        let record = Record::new().with_field("date", "2017-01-01T00:00:00.000Z");
        let err = cache.lookup(&record).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArgument(_)));
    }
}
