//! Image Header Module
//!
//! String-keyed metadata map attached to a decoded image.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Header ==
/// Metadata recorded at decode time (dimensions, color layout, format).
///
/// Serialized transparently as a JSON object; a BTreeMap keeps key order
/// deterministic on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Header(BTreeMap<String, Value>);

impl Header {
    /// Creates an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a metadata entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_insert_and_get() {
        let mut header = Header::new();
        header.insert("width", 640);
        header.insert("format", "image/png");

        assert_eq!(header.get("width"), Some(&serde_json::json!(640)));
        assert_eq!(header.get("format"), Some(&serde_json::json!("image/png")));
        assert_eq!(header.get("missing"), None);
        assert_eq!(header.len(), 2);
    }

    #[test]
    fn test_header_serializes_as_object() {
        let mut header = Header::new();
        header.insert("height", 480);

        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"height":480}"#);
    }
}
