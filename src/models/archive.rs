use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;

use super::record::Record;
use crate::dates::Period;

/// Records grouped under human-readable period labels
///
/// Labels keep the order in which they were first seen, so with sorted input
/// the most recent period comes first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PeriodBuckets {
    buckets: IndexMap<String, Vec<Rc<Record>>>,
}

impl PeriodBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the bucket for `label`, creating it if needed
    pub fn push(&mut self, label: String, record: Rc<Record>) {
        self.buckets.entry(label).or_default().push(record);
    }

    pub fn get(&self, label: &str) -> Option<&[Rc<Record>]> {
        self.buckets.get(label).map(Vec::as_slice)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rc<Record>])> {
        self.buckets.iter().map(|(label, records)| (label.as_str(), records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of records across all buckets
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Year, month and day buckets for one archive scope
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodGroups {
    pub years: PeriodBuckets,
    pub months: PeriodBuckets,
    pub days: PeriodBuckets,
}

impl PeriodGroups {
    pub fn buckets(&self, period: Period) -> &PeriodBuckets {
        match period {
            Period::Year => &self.years,
            Period::Month => &self.months,
            Period::Day => &self.days,
        }
    }

    pub fn buckets_mut(&mut self, period: Period) -> &mut PeriodBuckets {
        match period {
            Period::Year => &mut self.years,
            Period::Month => &mut self.months,
            Period::Day => &mut self.days,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Full grouping result: the root scope plus one scope per selected collection
///
/// Serializes flat, the way hosts expose it to templates:
/// `{ years, months, days, news: { years, months, days }, ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Archive {
    #[serde(flatten)]
    pub root: PeriodGroups,
    #[serde(flatten)]
    pub collections: IndexMap<String, PeriodGroups>,
}

impl Archive {
    pub fn collection(&self, name: &str) -> Option<&PeriodGroups> {
        self.collections.get(name)
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}
