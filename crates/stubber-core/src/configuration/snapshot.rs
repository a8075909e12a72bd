//! Snapshot (de)serialization.
//!
//! Branches are written in a tagged form so they survive a round trip
//! without being confused with plain-record leaves:
//!
//! ```json
//! {"type": "@SerializedMap", "entries": [["key", 1], ["nested", {"type": "@SerializedMap", "entries": []}]]}
//! ```
//!
//! Leaves are written as their raw JSON value, except records whose own
//! `"type"` field holds a reserved tag; those are wrapped as
//! `{"type": "@SerializedLeaf", "value": ...}`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::layered::LayeredConfiguration;
use super::node::{Branch, Node};
use super::precedence::ScopeStores;
use crate::error::{ConfigError, Result};
use crate::types::ConfigurationScope;

pub const SERIALIZED_MAP_TAG: &str = "@SerializedMap";
pub const SERIALIZED_LEAF_TAG: &str = "@SerializedLeaf";

const TAG_FIELD: &str = "type";

#[derive(Serialize)]
struct SerializedMap<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    entries: Vec<(&'a String, &'a Node)>,
}

#[derive(Serialize)]
struct SerializedLeaf<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a Value,
}

struct TaggedBranch<'a>(&'a Branch);

impl Serialize for TaggedBranch<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SerializedMap {
            kind: SERIALIZED_MAP_TAG,
            entries: self.0.iter().collect(),
        }
        .serialize(serializer)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) if carries_reserved_tag(value) => SerializedLeaf {
                kind: SERIALIZED_LEAF_TAG,
                value,
            }
            .serialize(serializer),
            Node::Leaf(value) => value.serialize(serializer),
            Node::Branch(branch) => TaggedBranch(branch).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        node_from_tagged(value).map_err(D::Error::custom)
    }
}

fn reserved_tag(fields: &serde_json::Map<String, Value>) -> Option<&str> {
    fields
        .get(TAG_FIELD)
        .and_then(Value::as_str)
        .filter(|tag| *tag == SERIALIZED_MAP_TAG || *tag == SERIALIZED_LEAF_TAG)
}

fn carries_reserved_tag(value: &Value) -> bool {
    value.as_object().is_some_and(|fields| reserved_tag(fields).is_some())
}

fn node_from_tagged(value: Value) -> std::result::Result<Node, String> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => return Ok(Node::Leaf(other)),
    };
    let tag = reserved_tag(&fields).map(str::to_owned);
    match tag.as_deref() {
        None => return Ok(Node::Leaf(Value::Object(fields))),
        Some(SERIALIZED_LEAF_TAG) => {
            return fields
                .remove("value")
                .map(Node::Leaf)
                .ok_or_else(|| format!("{SERIALIZED_LEAF_TAG} without a `value`"));
        }
        Some(_) => {}
    }

    let Some(Value::Array(entries)) = fields.remove("entries") else {
        return Err(format!("{SERIALIZED_MAP_TAG} without an `entries` array"));
    };

    let mut branch = Branch::new();
    for entry in entries {
        let pair = match entry {
            Value::Array(pair) if pair.len() == 2 => pair,
            other => return Err(format!("malformed {SERIALIZED_MAP_TAG} entry: {other}")),
        };
        let mut pair = pair.into_iter();
        let (Some(Value::String(key)), Some(child)) = (pair.next(), pair.next()) else {
            return Err(format!("{SERIALIZED_MAP_TAG} keys must be strings"));
        };
        branch.insert(key, node_from_tagged(child)?);
    }
    Ok(Node::Branch(branch))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    configuration: BTreeMap<ConfigurationScope, TaggedBranch<'a>>,
    language_configuration: BTreeMap<&'a String, BTreeMap<ConfigurationScope, TaggedBranch<'a>>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SnapshotDocument {
    configuration: BTreeMap<ConfigurationScope, Node>,
    language_configuration: BTreeMap<String, BTreeMap<ConfigurationScope, Node>>,
}

fn tagged_stores(stores: &ScopeStores) -> BTreeMap<ConfigurationScope, TaggedBranch<'_>> {
    stores
        .iter()
        .map(|(scope, branch)| (*scope, TaggedBranch(branch)))
        .collect()
}

fn stores_from_nodes(
    nodes: BTreeMap<ConfigurationScope, Node>,
) -> std::result::Result<ScopeStores, String> {
    nodes
        .into_iter()
        .map(|(scope, node)| match node {
            Node::Branch(branch) => Ok((scope, branch)),
            Node::Leaf(value) => Err(format!("{scope} store must be a {SERIALIZED_MAP_TAG}, got {value}")),
        })
        .collect()
}

impl Serialize for LayeredConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        SnapshotRef {
            configuration: tagged_stores(self.base()),
            language_configuration: self
                .languages()
                .iter()
                .map(|(language, stores)| (language, tagged_stores(stores)))
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LayeredConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let document = SnapshotDocument::deserialize(deserializer)?;
        let base = stores_from_nodes(document.configuration).map_err(D::Error::custom)?;
        let languages: BTreeMap<String, ScopeStores> = document
            .language_configuration
            .into_iter()
            .map(|(language, nodes)| stores_from_nodes(nodes).map(|stores| (language, stores)))
            .collect::<std::result::Result<_, String>>()
            .map_err(D::Error::custom)?;
        Ok(LayeredConfiguration::from_stores(base, languages))
    }
}

impl LayeredConfiguration {
    /// blake3 hash of the snapshot encoding. Keys are kept sorted and empty
    /// scope stores are dropped, so states that read the same hash equally.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(&self.without_empty_scopes())?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

pub fn to_json_string(configuration: &LayeredConfiguration) -> Result<String> {
    Ok(serde_json::to_string_pretty(configuration)?)
}

pub fn from_json_str(content: &str) -> Result<LayeredConfiguration> {
    Ok(serde_json::from_str(content)?)
}

/// Load a snapshot file; a missing file is an empty configuration.
pub fn load_snapshot(path: &Path) -> Result<LayeredConfiguration> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot file, starting empty");
        return Ok(LayeredConfiguration::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    from_json_str(&content)
}

pub fn save_snapshot(path: &Path, configuration: &LayeredConfiguration) -> Result<()> {
    let content = to_json_string(configuration)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
    tracing::debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Parse a hand-written JSON settings document. Every object becomes a
/// branch.
pub fn parse_plain_json_str(content: &str) -> Result<Branch> {
    let value: Value = serde_json::from_str(content)?;
    plain_root(value)
}

/// Parse a hand-written TOML settings document. Every table becomes a
/// branch.
pub fn parse_plain_toml_str(content: &str) -> Result<Branch> {
    let value: toml::Value = toml::from_str(content)?;
    plain_root(serde_json::to_value(value)?)
}

fn plain_root(value: Value) -> Result<Branch> {
    match Node::from_plain(value) {
        Node::Branch(branch) => Ok(branch),
        Node::Leaf(value) => Err(ConfigError::Snapshot(serde_json::Error::custom(format!(
            "settings document must be an object, got {value}"
        )))),
    }
}
