use indexmap::IndexMap;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::record::json_kind;

/// Which collections get their own archive scope
///
/// Accepts `true`, `false` or a map of collection name to flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CollectionsOption {
    /// Every collection the host knows about
    #[default]
    Enabled,
    /// No collection scopes at all
    Disabled,
    /// Explicit per-collection flags
    Selected(IndexMap<String, bool>),
}

impl CollectionsOption {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CollectionsOption::Disabled)
    }

    /// Resolve against the collections the host knows about
    ///
    /// A selection with at least one `true` flag acts as an allow-list over
    /// the known collections. A selection with no `true` flag includes every
    /// known collection. In both cases a collection flagged `false` is left
    /// out.
    pub fn resolve(&self, known: &[String]) -> Vec<String> {
        match self {
            CollectionsOption::Disabled => Vec::new(),
            CollectionsOption::Enabled => known.to_vec(),
            CollectionsOption::Selected(flags) => {
                let candidates: Vec<&String> = if flags.values().any(|flag| *flag) {
                    flags.keys().filter(|name| known.contains(name)).collect()
                } else {
                    known.iter().collect()
                };

                candidates
                    .into_iter()
                    .filter(|name| flags.get(name.as_str()) != Some(&false))
                    .cloned()
                    .collect()
            }
        }
    }
}

impl<'de> Deserialize<'de> for CollectionsOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null | Value::Bool(true) => Ok(CollectionsOption::Enabled),
            Value::Bool(false) => Ok(CollectionsOption::Disabled),
            Value::Object(map) => {
                let mut flags = IndexMap::with_capacity(map.len());
                for (name, flag) in map {
                    let flag = flag.as_bool().ok_or_else(|| {
                        Error::custom(format!(
                            "collection flag for {name:?} must be a boolean, found {}",
                            json_kind(&flag)
                        ))
                    })?;
                    flags.insert(name, flag);
                }
                Ok(CollectionsOption::Selected(flags))
            }
            other => Err(Error::custom(format!(
                "collections must be a boolean or a map of booleans, found {}",
                json_kind(&other)
            ))),
        }
    }
}
