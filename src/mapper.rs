//! Conversion between [`ConfigValue`] trees and typed Rust values.
//!
//! Any `Serialize`/`Deserialize` type can be bound. Polymorphic fields are
//! closed enums tagged with [`TYPE_TAG`](crate::policy::TYPE_TAG):
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(tag = "_type_")]
//! enum Transport {
//!     #[serde(rename = "tcp")]
//!     Tcp { port: u16 },
//!     #[serde(rename = "unix")]
//!     Unix { socket: String },
//! }
//! ```
//!
//! A changed tag makes [`diff`](crate::diff::diff) replace the whole object
//! instead of patching fields that belong to the old variant.
//!
//! For [`confique::Config`] types, [`bind_config`] goes through `C::Layer` so
//! that defaults and required-field checks apply as usual.

use confique::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::LayerfigError;
use crate::validate;
use crate::value::ConfigValue;

/// Deserialize `value` into `T`.
pub fn bind<T: DeserializeOwned>(value: &ConfigValue) -> Result<T, LayerfigError> {
    serde_json::from_value(value.clone().into()).map_err(|e| LayerfigError::Bind {
        reason: e.to_string(),
    })
}

/// Serialize `value` into a tree. Field order follows the type's
/// serialization order.
pub fn unbind<T: Serialize + ?Sized>(value: &T) -> Result<ConfigValue, LayerfigError> {
    serde_json::to_value(value)
        .map(ConfigValue::from)
        .map_err(|e| LayerfigError::Unbind {
            reason: e.to_string(),
        })
}

/// Deserialize `value` into the partial layer of config type `C`.
pub fn bind_layer<C: Config>(value: &ConfigValue) -> Result<C::Layer, LayerfigError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    bind(value)
}

/// Build a `C` from `value`, letting confique fill defaults and check
/// required fields. With `strict`, keys unknown to `C` are rejected first.
pub fn bind_config<C: Config>(value: &ConfigValue, strict: bool) -> Result<C, LayerfigError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    if strict {
        validate::validate_unknown_keys::<C>(value)?;
    }
    let layer = bind_layer::<C>(value)?;
    Ok(C::builder().preloaded(layer).load()?)
}
