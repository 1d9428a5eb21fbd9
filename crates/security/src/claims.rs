//! Raw provider claims (transport-agnostic).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The raw principal attributes handed over by an identity provider once the
/// OAuth2 handshake has completed elsewhere.
///
/// Claims are kept as an opaque JSON object; each provider strategy knows
/// which fields to read from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderClaims(Map<String, Value>);

impl ProviderClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// A string-valued claim, if present and actually a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ProviderClaims {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
