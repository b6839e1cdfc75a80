use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use super::Plugin;
use crate::error::{ArchiveError, Result};
use crate::models::record::json_kind;
use crate::models::{Files, Metadata, Record};
use crate::pipeline::sort_records;

const COLLECTIONS_KEY: &str = "collections";

/// Publish collections named by records' `collection` fields
///
/// Writes `metadata.collections` as a map of name to member records, most
/// recent first, names in alphabetical order. Collections already present in
/// the metadata are kept unless a record names them again.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionsPlugin;

impl Plugin for CollectionsPlugin {
    fn name(&self) -> &str {
        "collections"
    }

    fn run(&self, files: &mut Files, metadata: &mut Metadata) -> Result<()> {
        let mut members: BTreeMap<String, Vec<Rc<Record>>> = BTreeMap::new();
        for record in sort_records(files) {
            for name in record.collections()? {
                members.entry(name.to_string()).or_default().push(Rc::clone(&record));
            }
        }

        let mut collections = match metadata.get(COLLECTIONS_KEY) {
            None | Some(Value::Null) => serde_json::Map::new(),
            Some(Value::Object(existing)) => existing.clone(),
            Some(other) => {
                return Err(ArchiveError::invalid_argument(format!(
                    "metadata collections must be an object, found {}",
                    json_kind(other)
                )));
            }
        };
        for (name, records) in members {
            collections.insert(name, serde_json::to_value(records)?);
        }

        metadata.insert(COLLECTIONS_KEY.to_string(), Value::Object(collections));
        Ok(())
    }
}
