//! The configuration tree value model.
//!
//! [`ConfigValue`] is a JSON-shaped tree with one extra variant, [`Atom`](ConfigValue::Atom),
//! which marks a subtree as indivisible for merge and diff purposes. Objects
//! keep their insertion order: diff output and rendered CLI tokens follow it.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Deserializer, Serialize};

use crate::path::DotPath;

/// Insertion-ordered object map.
pub type Map = IndexMap<String, ConfigValue>;

/// Nesting depth past which merge and diff stop recursing and the compiler
/// refuses input documents.
pub const MAX_DEPTH: usize = 256;

/// A configuration tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<ConfigValue>),
    Object(Map),
    /// Replace wholesale; never recurse into the contained value.
    ///
    /// Build through [`ConfigValue::atom`], which never stacks wrappers.
    Atom(Box<ConfigValue>),
}

impl ConfigValue {
    /// Wrap `value` as an atom. Wrapping an atom returns it unchanged.
    pub fn atom(value: impl Into<ConfigValue>) -> Self {
        match value.into() {
            atom @ ConfigValue::Atom(_) => atom,
            other => ConfigValue::Atom(Box::new(other)),
        }
    }

    /// An empty object.
    pub fn object() -> Self {
        ConfigValue::Object(Map::new())
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, ConfigValue::Atom(_))
    }

    /// Strip every stacked `Atom` wrapper from the top of this value.
    pub fn into_unwrapped(self) -> ConfigValue {
        let mut value = self;
        while let ConfigValue::Atom(inner) = value {
            value = *inner;
        }
        value
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a direct child of an object.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_object()?.get(key)
    }

    /// Navigate by dotted path. The empty path returns `self`.
    pub fn get_path(&self, path: &DotPath) -> Option<&ConfigValue> {
        let mut current = self;
        for segment in path.segments() {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Nesting depth: scalars are 0, containers add one per level.
    /// Atom wrappers do not count.
    pub fn depth(&self) -> usize {
        match self {
            ConfigValue::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            ConfigValue::Object(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            ConfigValue::Atom(inner) => inner.depth(),
            _ => 0,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "array",
            ConfigValue::Object(_) => "object",
            ConfigValue::Atom(inner) => inner.kind(),
        }
    }

    /// Compact JSON rendering with every `Atom` wrapper stripped.
    pub fn to_json_string(&self) -> String {
        // Keys are strings and numbers are finite, so this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string())
    }
}

// --- serde ---

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Number(n) => n.serialize(serializer),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Array(items) => items.serialize(serializer),
            ConfigValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            ConfigValue::Atom(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(ConfigValue::from)
    }
}

// --- conversions ---

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => ConfigValue::Number(n),
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Array(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ConfigValue> for serde_json::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Null => serde_json::Value::Null,
            ConfigValue::Bool(b) => serde_json::Value::Bool(b),
            ConfigValue::Number(n) => serde_json::Value::Number(n),
            ConfigValue::String(s) => serde_json::Value::String(s),
            ConfigValue::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            ConfigValue::Object(map) => {
                serde_json::Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            ConfigValue::Atom(inner) => (*inner).into(),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Number(n.into())
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue::Number(n.into())
    }
}

impl From<f64> for ConfigValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(ConfigValue::Null, ConfigValue::Number)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Array(items)
    }
}

impl From<Map> for ConfigValue {
    fn from(map: Map) -> Self {
        ConfigValue::Object(map)
    }
}
