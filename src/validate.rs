//! Strict-mode validation: detect keys that a config type does not know.
//!
//! Deserializes the compiled tree into `C::Layer` (all fields optional) through
//! `serde_ignored`, which reports every key the layer does not consume.

use confique::Config;
use serde::Deserialize;

use crate::error::LayerfigError;
use crate::value::ConfigValue;

/// Check that `value` contains no keys unknown to config type `C`.
///
/// Each unknown key is reported by its dotted path, e.g. `database.typo`.
pub fn validate_unknown_keys<C: Config>(value: &ConfigValue) -> Result<(), LayerfigError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown_keys: Vec<String> = Vec::new();

    let json: serde_json::Value = value.clone().into();
    let _layer: C::Layer = serde_ignored::deserialize(json, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| LayerfigError::Bind {
        reason: e.to_string(),
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors = unknown_keys
        .into_iter()
        .map(|key| LayerfigError::UnknownKey { key })
        .collect();
    Err(LayerfigError::UnknownKeys(errors))
}
