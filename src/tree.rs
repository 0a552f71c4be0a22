//! Snapshot tree for the configuration document.
//!
//! A snapshot is an immutable `Arc<DocNode>`. Edits never mutate a snapshot
//! in place; [`crate::mutate::apply`] builds a new tree that shallow-copies
//! the nodes along the edited path and shares every other subtree with the
//! previous snapshot. Holders of an older snapshot (a projection that is
//! mid-render) keep seeing a consistent document.
//!
//! Maps preserve insertion order so that the serialized projection emits keys
//! in declaration order.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::path::{NodePath, Segment};

/// One node of a document snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum DocNode {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Seq(Vec<Arc<DocNode>>),
    Map(IndexMap<String, Arc<DocNode>>),
}

impl DocNode {
    /// Empty record node.
    pub fn empty_map() -> Self {
        DocNode::Map(IndexMap::new())
    }

    /// Human-readable node kind, used in path errors.
    pub fn kind(&self) -> &'static str {
        match self {
            DocNode::Null => "null",
            DocNode::Bool(_) => "boolean",
            DocNode::Number(_) => "number",
            DocNode::Str(_) => "string",
            DocNode::Seq(_) => "sequence",
            DocNode::Map(_) => "record",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocNode::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Arc<DocNode>]> {
        match self {
            DocNode::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Arc<DocNode>>> {
        match self {
            DocNode::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Resolve `path` against this node. Returns `None` for any missing or
    /// structurally incompatible step; reads never materialize anything.
    pub fn get(&self, path: &NodePath) -> Option<&DocNode> {
        let mut node = self;
        for seg in path.segments() {
            node = match (node, seg) {
                (DocNode::Map(entries), Segment::Key(k)) => entries.get(k)?,
                (DocNode::Seq(items), Segment::Index(i)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Length of the sequence at `path`, or `None` if there is no sequence
    /// there. Distinguishes "absent" (`None`) from "present but empty"
    /// (`Some(0)`), which is what the sub-list toggles encode.
    pub fn seq_len(&self, path: &NodePath) -> Option<usize> {
        self.get(path)?.as_seq().map(<[_]>::len)
    }

    /// Convert a JSON value into a snapshot subtree.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => DocNode::Null,
            Value::Bool(b) => DocNode::Bool(b),
            Value::Number(n) => DocNode::Number(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => DocNode::Str(s),
            Value::Array(items) => DocNode::Seq(
                items
                    .into_iter()
                    .map(|item| Arc::new(DocNode::from_json(item)))
                    .collect(),
            ),
            Value::Object(entries) => DocNode::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Arc::new(DocNode::from_json(v))))
                    .collect(),
            ),
        }
    }

    /// Convert this subtree back into a JSON value (declaration order is
    /// preserved through `serde_json`'s ordered map).
    pub fn to_json(&self) -> Value {
        match self {
            DocNode::Null => Value::Null,
            DocNode::Bool(b) => Value::Bool(*b),
            DocNode::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DocNode::Str(s) => Value::String(s.clone()),
            DocNode::Seq(items) => {
                Value::Array(items.iter().map(|item| item.to_json()).collect())
            }
            DocNode::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Serialize for DocNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocNode::Null => serializer.serialize_unit(),
            DocNode::Bool(b) => serializer.serialize_bool(*b),
            DocNode::Number(n) => {
                // Whole numbers print without a trailing ".0", matching the
                // JSON the typed model round-trips through.
                if n.fract() == 0.0 && n.is_finite() {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            DocNode::Str(s) => serializer.serialize_str(s),
            DocNode::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item.as_ref())?;
                }
                seq.end()
            }
            DocNode::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v.as_ref())?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_path;
    use serde_json::json;

    fn sample() -> DocNode {
        DocNode::from_json(json!({
            "general": { "useCollapse": true },
            "properties": [
                { "key": "apiKey", "type": "string" },
                { "key": "region", "type": "string" }
            ]
        }))
    }

    #[test]
    fn get_resolves_nested_paths() {
        let tree = sample();
        let key = tree.get(&node_path!["properties", 1, "key"]).unwrap();
        assert_eq!(key.as_str(), Some("region"));
        assert!(tree.get(&node_path!["properties", 2]).is_none());
        assert!(tree.get(&node_path!["general", 0]).is_none());
    }

    #[test]
    fn seq_len_distinguishes_absent_from_empty() {
        let tree = DocNode::from_json(json!({ "a": [], "b": {} }));
        assert_eq!(tree.seq_len(&node_path!["a"]), Some(0));
        assert_eq!(tree.seq_len(&node_path!["missing"]), None);
        assert_eq!(tree.seq_len(&node_path!["b"]), None);
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let source = json!({
            "zeta": 1,
            "alpha": { "b": true, "a": "x" },
            "list": ["one", "two"]
        });
        let round_tripped = DocNode::from_json(source.clone()).to_json();
        assert_eq!(round_tripped, source);
        // preserve_order keeps declaration order, so textual form matches too
        assert_eq!(
            serde_json::to_string(&round_tripped).unwrap(),
            serde_json::to_string(&source).unwrap()
        );
    }

    #[test]
    fn whole_numbers_serialize_without_fraction() {
        let n = DocNode::Number(3.0);
        assert_eq!(serde_json::to_string(&n).unwrap(), "3");
        let f = DocNode::Number(2.5);
        assert_eq!(serde_json::to_string(&f).unwrap(), "2.5");
    }
}
