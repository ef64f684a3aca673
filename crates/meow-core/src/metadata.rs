use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{MeowError, Result};

/// The AI facing document carried by a container.
///
/// It is an arbitrary JSON object. The codec never looks into it, it only cares
/// about the compressed size. Records are built by the caller and handed over by
/// reference, so the codec cannot change them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord(Map<String, Value>);

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// adds or replaces a top level entry while the record is being built
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// takes over all top level entries of `other`, existing keys are replaced
    pub fn merge(mut self, other: MetadataRecord) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).map_err(MeowError::MetadataSerialization)
    }

    /// parses a JSON document, the top level has to be an object
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| MeowError::InvalidMetadata(e.to_string()))?;

        Self::try_from(value)
    }
}

impl From<Map<String, Value>> for MetadataRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for MetadataRecord {
    type Error = MeowError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(MeowError::InvalidMetadata(format!(
                "expected a JSON object, got `{other}`"
            ))),
        }
    }
}
