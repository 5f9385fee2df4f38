use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ClusterConfig is the cluster-wide settings document that gets handed to the leader sentinel.
///
/// We don't own its schema, the leader does. All we require is that it's a JSON object, and we
/// pass every field through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterConfig(Map<String, Value>);

impl ClusterConfig {
    pub fn new() -> Self {
        ClusterConfig(Map::new())
    }

    /// Decode a JSON document. Fails unless the document is a JSON object.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ClusterConfig {
    fn from(fields: Map<String, Value>) -> Self {
        ClusterConfig(fields)
    }
}
