//! Parse the value half of a `key=value` argument.
//!
//! The text is parsed as JSON. When that fails, the raw text is kept as a
//! string, unless it contains one of `[`, `]`, `{`, `"`: such text was meant
//! to be structured, and the JSON error is surfaced instead of silently
//! producing a string.

use crate::error::LayerfigError;
use crate::value::ConfigValue;

const STRUCTURED_CHARS: &[char] = &['[', ']', '{', '}', '"'];

/// Parse `text` with the guarded scalar grammar.
///
/// `8080` → number, `true` → bool, `null` → null, `[1, 2]` → array,
/// `localhost` → string, `b: 2` → string, `[1,` → error.
pub fn parse_scalar(text: &str) -> Result<ConfigValue, LayerfigError> {
    match serde_json::from_str::<ConfigValue>(text) {
        Ok(value) => Ok(value),
        Err(_) if !looks_structured(text) => Ok(ConfigValue::String(text.to_string())),
        Err(source) => Err(LayerfigError::InvalidJson {
            text: text.to_string(),
            source,
        }),
    }
}

/// Parse `text` as strict JSON, with no string fallback.
pub fn parse_json(text: &str) -> Result<ConfigValue, LayerfigError> {
    serde_json::from_str(text).map_err(|source| LayerfigError::InvalidJson {
        text: text.to_string(),
        source,
    })
}

fn looks_structured(text: &str) -> bool {
    text.contains(STRUCTURED_CHARS)
}
