//! Tree nodes of a configuration store.
//!
//! A store is a [`Branch`]: a mapping from key to [`Node`]. Only branches
//! are traversed by dotted paths; a leaf holding a JSON object is an opaque
//! record and stops traversal like any other leaf.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub type Branch = BTreeMap<String, Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Value),
    Branch(Branch),
}

impl Node {
    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    /// Flatten into plain JSON; branches become objects.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Leaf(value) => value.clone(),
            Node::Branch(branch) => Value::Object(branch_to_map(branch)),
        }
    }

    /// Build a node from hand-written settings, turning every object into a
    /// branch.
    pub fn from_plain(value: Value) -> Node {
        match value {
            Value::Object(map) => Node::Branch(
                map.into_iter()
                    .map(|(key, child)| (key, Node::from_plain(child)))
                    .collect(),
            ),
            other => Node::Leaf(other),
        }
    }
}

pub(crate) fn branch_to_map(branch: &Branch) -> Map<String, Value> {
    branch
        .iter()
        .map(|(key, node)| (key.clone(), node.to_value()))
        .collect()
}

/// Split a dotted section into path segments.
///
/// Segments are kept verbatim, so `""` yields one empty segment.
pub fn split_section(section: &str) -> Vec<String> {
    section.split('.').map(str::to_string).collect()
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Leaf(value)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Leaf(Value::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Leaf(Value::from(value))
    }
}
