use std::rc::Rc;

use log::{debug, warn};
use serde_json::Value;

use crate::dates::{DateCache, Period};
use crate::error::{ArchiveError, Result};
use crate::models::record::json_kind;
use crate::models::{Archive, Metadata, PeriodGroups, Record};

const COLLECTIONS_KEY: &str = "collections";

/// Bucket `records` by year, month and day label
///
/// Records land in buckets in the order given, so sorted input yields
/// sorted buckets.
pub fn group_periods(cache: &DateCache, records: &[Rc<Record>]) -> Result<PeriodGroups> {
    let mut groups = PeriodGroups::default();

    for record in records {
        let parsed = cache.lookup(record)?;
        for period in Period::ALL {
            let label = parsed.label(period).ok_or_else(|| {
                ArchiveError::invalid_argument(format!(
                    "cannot group record with invalid date {:?}",
                    record.date().unwrap_or_default()
                ))
            })?;
            groups.buckets_mut(period).push(label, Rc::clone(record));
        }
    }

    Ok(groups)
}

/// Build the archive for all records plus one scope per selected collection
///
/// `collections` is the already resolved selection. Each collection scope
/// only ever holds records whose `collection` list names it.
pub fn archive_records(
    cache: &DateCache,
    sorted: &[Rc<Record>],
    collections: &[String],
) -> Result<Archive> {
    let mut archive = Archive { root: group_periods(cache, sorted)?, ..Archive::default() };

    for name in collections {
        if Period::ALL.iter().any(|period| period.name() == name.as_str()) {
            warn!("skipping collection {name:?}: the name is reserved for root-level periods");
            continue;
        }

        let mut members = Vec::new();
        for record in sorted {
            if record.belongs_to(name)? {
                members.push(Rc::clone(record));
            }
        }

        debug!("archiving {} records in collection {name:?}", members.len());
        archive.collections.insert(name.clone(), group_periods(cache, &members)?);
    }

    Ok(archive)
}

/// Collection names the host exposes under the `collections` metadata key
pub fn known_collections(metadata: &Metadata) -> Result<Vec<String>> {
    match metadata.get(COLLECTIONS_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(collections)) => Ok(collections.keys().cloned().collect()),
        Some(other) => Err(ArchiveError::invalid_argument(format!(
            "metadata collections must be an object, found {}",
            json_kind(other)
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pipeline::cache_dates;

    fn record(date: &str, collections: &[&str]) -> Rc<Record> {
        Rc::new(
            Record::new().with_field("date", date).with_field("collection", collections.to_vec()),
        )
    }

    fn labels(buckets: &crate::models::PeriodBuckets) -> Vec<&str> {
        buckets.labels().collect()
    }

    #[test]
    fn test_groups_by_year_month_day() {
        let (cache, sorted) = cache_dates(vec![
            record("2017-01-01T00:00:00.000Z", &[]),
            record("2016-12-31T00:00:00.000Z", &[]),
            record("2016-12-25T00:00:00.000Z", &[]),
        ]);

        let groups = group_periods(&cache, &sorted).unwrap();
        assert_eq!(labels(&groups.years), vec!["2017", "2016"]);
        assert_eq!(labels(&groups.months), vec!["January 2017", "December 2016"]);
        assert_eq!(
            labels(&groups.days),
            vec![
                "Sunday, 1st January 2017",
                "Saturday, 31st December 2016",
                "Sunday, 25th December 2016"
            ]
        );
        assert_eq!(groups.years.get("2016").unwrap().len(), 2);
    }

    #[test]
    fn test_every_record_in_exactly_one_bucket_per_period() {
        let (cache, sorted) = cache_dates(vec![
            record("2016-08-08T00:00:00.000Z", &[]),
            record("2016-08-08T12:00:00.000Z", &[]),
            record("2016-06-04T00:00:00.000Z", &[]),
            record("2015-06-04T00:00:00.000Z", &[]),
        ]);

        let groups = group_periods(&cache, &sorted).unwrap();
        for period in Period::ALL {
            assert_eq!(groups.buckets(period).record_count(), sorted.len());
        }
        assert_eq!(groups.days.len(), 3);
    }

    #[test]
    fn test_label_collisions_keep_sort_order() {
        let (cache, sorted) = cache_dates(vec![
            record("2016-08-08T12:00:00.000Z", &[]),
            record("2016-08-08T00:00:00.000Z", &[]),
        ]);

        let groups = group_periods(&cache, &sorted).unwrap();
        let day = groups.days.get("Monday, 8th August 2016").unwrap();
        assert!(Rc::ptr_eq(&day[0], &sorted[0]));
        assert!(Rc::ptr_eq(&day[1], &sorted[1]));
    }

    #[test]
    fn test_collection_scopes_are_isolated() {
        let (cache, sorted) = cache_dates(vec![
            record("2017-01-01T00:00:00.000Z", &["studies"]),
            record("2016-08-08T00:00:00.000Z", &["news", "events"]),
            record("2016-06-04T00:00:00.000Z", &["news"]),
        ]);

        let collections = vec!["news".to_string(), "events".to_string()];
        let archive = archive_records(&cache, &sorted, &collections).unwrap();

        assert_eq!(archive.collection_names().collect::<Vec<_>>(), vec!["news", "events"]);
        assert_eq!(labels(&archive.root.years), vec!["2017", "2016"]);

        let news = archive.collection("news").unwrap();
        assert_eq!(labels(&news.years), vec!["2016"]);
        assert_eq!(labels(&news.months), vec!["August 2016", "June 2016"]);
        for (_, records) in news.days.iter() {
            assert!(records.iter().all(|r| r.belongs_to("news").unwrap()));
        }

        let events = archive.collection("events").unwrap();
        assert_eq!(events.years.record_count(), 1);
        assert!(archive.collection("studies").is_none());
    }

    #[test]
    fn test_collection_without_members_is_empty() {
        let (cache, sorted) = cache_dates(vec![record("2017-01-01T00:00:00.000Z", &[])]);
        let archive = archive_records(&cache, &sorted, &["news".to_string()]).unwrap();
        assert!(archive.collection("news").unwrap().is_empty());
    }

    #[test]
    fn test_reserved_collection_names_are_skipped() {
        let (cache, sorted) = cache_dates(vec![record("2017-01-01T00:00:00.000Z", &["days"])]);
        let archive = archive_records(&cache, &sorted, &["days".to_string()]).unwrap();
        assert!(archive.collections.is_empty());
        assert_eq!(archive.root.days.len(), 1);
    }

    #[test]
    fn test_invalid_record_cannot_be_grouped() {
        let (cache, sorted) = cache_dates(vec![record("not-a-date", &[])]);
        assert!(matches!(group_periods(&cache, &sorted), Err(ArchiveError::InvalidArgument(_))));
    }

    #[test]
    fn test_malformed_collection_field_is_invalid_argument() {
        let bad = Rc::new(
            Record::new()
                .with_field("date", "2017-01-01T00:00:00.000Z")
                .with_field("collection", 7),
        );
        let (cache, sorted) = cache_dates(vec![bad]);
        let err = archive_records(&cache, &sorted, &["news".to_string()]).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidArgument(_)));
    }

    #[test]
    fn test_known_collections() {
        let mut metadata = Metadata::new();
        assert!(known_collections(&metadata).unwrap().is_empty());

        metadata.insert("collections".to_string(), json!({"news": [], "events": []}));
        assert_eq!(known_collections(&metadata).unwrap(), vec!["news", "events"]);

        metadata.insert("collections".to_string(), json!(["news"]));
        assert!(known_collections(&metadata).is_err());
    }
}
