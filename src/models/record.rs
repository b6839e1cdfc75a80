use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ArchiveError, Result};

const DATE_FIELD: &str = "date";
const COLLECTION_FIELD: &str = "collection";

/// Host file map: source path to record, in insertion order
pub type Files = IndexMap<String, Record>;

/// Host-owned metadata store
pub type Metadata = Map<String, Value>;

/// One content item supplied by the host
///
/// Records are opaque JSON objects. The archive only reads `date` (raw string)
/// and `collection` (a name or a list of names); every other field is carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, rejecting anything that is not an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ArchiveError::invalid_argument(format!(
                "record must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.to_string(), value.into())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Raw date string, if the record carries one
    pub fn date(&self) -> Option<&str> {
        self.fields.get(DATE_FIELD).and_then(Value::as_str)
    }

    /// Collection names this record belongs to
    ///
    /// Accepts a single name or an array of names. Absent or `null` means no
    /// collections.
    pub fn collections(&self) -> Result<Vec<&str>> {
        match self.fields.get(COLLECTION_FIELD) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(name)) => Ok(vec![name.as_str()]),
            Some(Value::Array(names)) => names
                .iter()
                .map(|name| {
                    name.as_str().ok_or_else(|| {
                        ArchiveError::invalid_argument(format!(
                            "collection names must be strings, found {}",
                            json_kind(name)
                        ))
                    })
                })
                .collect(),
            Some(other) => Err(ArchiveError::invalid_argument(format!(
                "collection must be a string or an array of strings, found {}",
                json_kind(other)
            ))),
        }
    }

    pub fn belongs_to(&self, collection: &str) -> Result<bool> {
        Ok(self.collections()?.contains(&collection))
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
