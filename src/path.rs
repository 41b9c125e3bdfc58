//! Dotted key paths and the conversions between paths and nested objects.
//!
//! `database.pool.size` addresses `{"database": {"pool": {"size": ..}}}`.
//! [`encode`] builds the single-branch object for a path, [`assign`] writes a
//! value at a path inside an existing tree, and [`decode`] goes the other way,
//! splitting an overlay into `(path, leaf)` pairs that [`to_cli_args`] renders
//! as assignment tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::LayerfigError;
use crate::policy::LeafPolicy;
use crate::value::{ConfigValue, Map};

/// A sequence of object keys. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DotPath(Vec<String>);

impl DotPath {
    pub fn root() -> Self {
        DotPath(Vec::new())
    }

    /// Parse `a.b.c`. Every segment must be non-empty and free of `=`.
    pub fn parse(dotted: &str) -> Result<Self, LayerfigError> {
        let invalid = |reason| LayerfigError::InvalidPath {
            path: dotted.to_string(),
            reason,
        };
        if dotted.is_empty() {
            return Err(invalid("empty key"));
        }
        let mut segments = Vec::new();
        for segment in dotted.split('.') {
            if segment.is_empty() {
                return Err(invalid("empty segment"));
            }
            if segment.contains('=') {
                return Err(invalid("segments cannot contain '='"));
            }
            segments.push(segment.to_string());
        }
        Ok(DotPath(segments))
    }

    /// Append a segment.
    pub fn key(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Render `path=json` as an assignment token.
    ///
    /// Paths starting with `-` use the explicit `--set=` form so they are not
    /// mistaken for flags.
    pub fn assign_arg(&self, value: &ConfigValue) -> Result<String, LayerfigError> {
        if self.is_root() {
            return Err(LayerfigError::UnrepresentableRoot);
        }
        if let Some(bad) = self.0.iter().find(|s| !is_addressable(s)) {
            return Err(LayerfigError::InvalidPath {
                path: bad.clone(),
                reason: "key cannot be written as a path segment",
            });
        }
        let json = value.to_json_string();
        if self.0[0].starts_with('-') {
            Ok(format!("--set={self}={json}"))
        } else {
            Ok(format!("{self}={json}"))
        }
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for DotPath {
    type Err = LayerfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotPath::parse(s)
    }
}

/// Whether `key` can appear as one segment of a dotted path.
pub fn is_addressable(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '='])
}

/// Treats objects with keys that cannot be written as path segments as leaves.
///
/// Such an object can only be replaced as a whole by an assignment token, so
/// diffs that will be rendered with [`to_cli_args`] stop there.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnaddressableKeys;

impl LeafPolicy for UnaddressableKeys {
    fn is_leaf(&self, _from: &ConfigValue, to: &ConfigValue) -> bool {
        to.as_object()
            .is_some_and(|map| !map.keys().all(|k| is_addressable(k)))
    }
}

/// Build the single-branch object that holds `value` at `path`.
pub fn encode(path: &DotPath, value: ConfigValue) -> ConfigValue {
    path.segments().iter().rev().fold(value, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.clone(), inner);
        ConfigValue::Object(map)
    })
}

/// Write `value` at `path` inside `base`.
///
/// Intermediate objects are created as needed; a non-object met on the way
/// is replaced by one. Existing keys keep their position.
pub fn assign(base: ConfigValue, path: &DotPath, value: ConfigValue) -> ConfigValue {
    assign_segments(base, path.segments(), value)
}

fn assign_segments(base: ConfigValue, segments: &[String], value: ConfigValue) -> ConfigValue {
    let Some((head, rest)) = segments.split_first() else {
        return value;
    };
    let mut map = match base.into_unwrapped() {
        ConfigValue::Object(map) => map,
        _ => Map::new(),
    };
    match map.get_mut(head) {
        Some(slot) => {
            let current = std::mem::take(slot);
            *slot = assign_segments(current, rest, value);
        }
        None => {
            map.insert(head.clone(), assign_segments(ConfigValue::Null, rest, value));
        }
    }
    ConfigValue::Object(map)
}

/// Split `value` into `(path, leaf)` pairs, depth first in key order.
///
/// Recursion descends through non-empty objects whose keys are all
/// addressable. Everything else, including empty objects and atoms, is a
/// leaf. At the root an object is always descended, so `{}` yields nothing.
pub fn decode(value: &ConfigValue) -> Vec<(DotPath, ConfigValue)> {
    let mut out = Vec::new();
    decode_into(value, DotPath::root(), &mut out);
    out
}

fn decode_into(value: &ConfigValue, prefix: DotPath, out: &mut Vec<(DotPath, ConfigValue)>) {
    if let ConfigValue::Object(map) = value
        && map.keys().all(|k| is_addressable(k))
        && (prefix.is_root() || !map.is_empty())
    {
        for (key, child) in map {
            decode_into(child, prefix.clone().key(key.clone()), out);
        }
        return;
    }
    out.push((prefix, value.clone().into_unwrapped()));
}

/// Render an overlay as assignment tokens.
///
/// Compiling the result over an empty tree reproduces `overlay` whenever it
/// is an atom-free object. A leaf at the root, such as an atom replacing the
/// whole tree, has no token form and is an error.
pub fn to_cli_args(overlay: &ConfigValue) -> Result<Vec<String>, LayerfigError> {
    decode(overlay)
        .into_iter()
        .map(|(path, leaf)| path.assign_arg(&leaf))
        .collect()
}
