// records: the field mappings handed to the writer, one per output document

use serde_yaml::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field that, when present and longer than one character, names the file verbatim
pub const SLUG_KEY: &str = "slug";

/// Field synthesized with the current time when neither side supplies it
pub const DATE_KEY: &str = "date";

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record must be a mapping of fields, found {0}")]
    NotAMapping(&'static str),

    #[error("Failed to convert record: {0}")]
    Convert(#[from] serde_yaml::Error),
}

/// A flat mapping of field names to arbitrary values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a YAML mapping. Non-string keys are rendered as text.
    pub fn from_yaml(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Mapping(mapping) => Ok(mapping
                .into_iter()
                .filter_map(|(key, value)| scalar_text(&key).map(|key| (key, value)))
                .collect()),
            Value::Tagged(tagged) => Self::from_yaml(tagged.value),
            other => Err(RecordError::NotAMapping(kind_of(&other))),
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        Self::from_yaml(serde_yaml::to_value(value)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Textual form of a scalar field; `None` for null, missing or nested values.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }

    pub fn slug(&self) -> Option<String> {
        self.text(SLUG_KEY)
    }

    pub fn date(&self) -> Option<&Value> {
        self.get(DATE_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Render a scalar YAML value as text
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
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
