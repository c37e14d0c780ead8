pub mod quote;

pub use quote::shell_quote;

use crate::utils::errors::{Result, UploaderError};
use ordermap::OrderMap;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Ordered key-value pairs taken from a ConfigMap's `data` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueSet {
    entries: OrderMap<String, String>,
}

impl KeyValueSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `KEY=VALUE` words with each value shell-quoted, in document order
    pub fn tokens(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{key}={}", shell_quote(value)))
            .collect()
    }

    /// The pairs as a flat JSON object
    pub fn to_json(&self) -> serde_json::Value {
        self.iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for KeyValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(" "))
    }
}

/// Read the `data` section of the ConfigMap at `path`.
///
/// Returns `None` when the document has no `data`, `data: null`, or an empty
/// mapping.
pub fn load_data(path: &Path) -> Result<Option<KeyValueSet>> {
    let contents = fs::read_to_string(path)?;
    parse_data(&contents)
}

/// Same as [`load_data`] for an in-memory document.
///
/// Scalars are taken as written (`1.10` stays `1.10`, `0x1F` stays `0x1F`);
/// `null` and empty values become the empty string.
pub fn parse_data(yaml: &str) -> Result<Option<KeyValueSet>> {
    let raw = match serde_yaml::from_str::<Document>(yaml) {
        Ok(document) => document.data.map(|data| data.0).unwrap_or_default(),
        Err(e) => return explain_failure(yaml, e),
    };

    let mut entries = OrderMap::with_capacity(raw.len());
    for (key, value) in raw {
        if entries.contains_key(&key) {
            return Err(UploaderError::ConfigMap(format!("duplicate key `{key}` in `data`")));
        }
        entries.insert(key, value.unwrap_or_default());
    }

    if entries.is_empty() {
        return Ok(None);
    }
    tracing::debug!("Parsed {} entries from ConfigMap data", entries.len());
    Ok(Some(KeyValueSet { entries }))
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    data: Option<DataEntries>,
}

/// `data` entries in document order, duplicates included
struct DataEntries(Vec<(String, Option<String>)>);

impl<'de> Deserialize<'de> for DataEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DataEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of scalar keys to scalar values")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<DataEntries, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Option<String>>()? {
                    entries.push(entry);
                }
                Ok(DataEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Turn a failed typed parse into a precise error, or into "no data" for
/// documents that are not mappings at all
fn explain_failure(yaml: &str, err: serde_yaml::Error) -> Result<Option<KeyValueSet>> {
    let Ok(document) = serde_yaml::from_str::<Value>(yaml) else {
        return Err(err.into());
    };

    match document.get("data") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(mapping)) => {
            for (key, value) in mapping {
                if !is_scalar(key) {
                    return Err(UploaderError::ConfigMap(format!(
                        "unsupported key type: {}",
                        kind_of(key)
                    )));
                }
                if !is_scalar(value) {
                    return Err(UploaderError::ConfigMap(format!(
                        "value of `{}` must be a scalar, found {}",
                        describe_key(key),
                        kind_of(value)
                    )));
                }
            }
            Err(err.into())
        }
        Some(other) => Err(UploaderError::ConfigMap(format!(
            "`data` must be a mapping, found {}",
            kind_of(other)
        ))),
    }
}

fn is_scalar(value: &Value) -> bool {
    match value {
        Value::Sequence(_) | Value::Mapping(_) => false,
        Value::Tagged(tagged) => is_scalar(&tagged.value),
        _ => true,
    }
}

fn describe_key(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => kind_of(key).to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
