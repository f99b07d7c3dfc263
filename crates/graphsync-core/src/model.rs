//! Core data structures for attributed graphs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute value. `Value::Null` doubles as the explicit "no value" marker.
pub type AttrValue = serde_json::Value;

/// Attribute mapping carried by graphs, nodes and edges, in insertion order.
pub type Attributes = IndexMap<String, AttrValue>;

/// Node weight stored in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeData {
    /// Unique node key within a graph.
    pub key: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl NodeData {
    pub fn new(key: impl Into<String>, attributes: Attributes) -> Self {
        NodeData {
            key: key.into(),
            attributes,
        }
    }
}

/// Edge weight stored in the graph. Endpoints live in the graph topology.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeData {
    /// Unique edge key within a graph.
    pub key: String,
    #[serde(default)]
    pub attributes: Attributes,
}

impl EdgeData {
    pub fn new(key: impl Into<String>, attributes: Attributes) -> Self {
        EdgeData {
            key: key.into(),
            attributes,
        }
    }
}

/// Overlay `incoming` onto `existing`. Keys absent from `incoming` are kept.
pub fn overlay(existing: &mut Attributes, incoming: Attributes) {
    existing.extend(incoming);
}

/// Build an attribute map from key/value pairs.
pub fn attrs<K, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    I: IntoIterator<Item = (K, AttrValue)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_keeps_unmentioned_keys() {
        let mut existing = attrs([("color", json!("red")), ("size", json!(5))]);
        overlay(&mut existing, attrs([("color", json!("blue"))]));

        assert_eq!(existing["color"], json!("blue"));
        assert_eq!(existing["size"], json!(5));
    }

    #[test]
    fn overlay_keeps_existing_positions() {
        let mut existing = attrs([("size", json!(5)), ("color", json!("red"))]);
        overlay(&mut existing, attrs([("weight", json!(2)), ("size", json!(6))]));

        let names: Vec<&str> = existing.keys().map(String::as_str).collect();
        assert_eq!(names, ["size", "color", "weight"]);
        assert_eq!(existing["size"], json!(6));
    }
}
