//! Named value factories for `--from-fn=ID` and `--set-from-fn=PATH=ID`.
//!
//! Arguments can only name a factory registered by the host program; nothing
//! outside the registry is ever reachable from the command line.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::LayerfigError;
use crate::mapper;
use crate::value::ConfigValue;

type Factory = Arc<dyn Fn() -> Result<ConfigValue, LayerfigError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Registry {
    factories: BTreeMap<String, Factory>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `id`. Its output is serialized into a
    /// [`ConfigValue`] each time the id is resolved.
    ///
    /// Ids must be non-empty printable ASCII without whitespace, and unique.
    pub fn register<T, F>(&mut self, id: &str, factory: F) -> Result<&mut Self, LayerfigError>
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        validate_id(id)?;
        if self.factories.contains_key(id) {
            return Err(LayerfigError::DuplicateIdentifier(id.to_string()));
        }
        self.factories
            .insert(id.to_string(), Arc::new(move || mapper::unbind(&factory())));
        Ok(self)
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<T, F>(mut self, id: &str, factory: F) -> Result<Self, LayerfigError>
    where
        T: Serialize,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.register(id, factory)?;
        Ok(self)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Run the factory registered under `id`.
    pub fn resolve(&self, id: &str) -> Result<ConfigValue, LayerfigError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| LayerfigError::UnknownIdentifier(id.to_string()))?;
        tracing::debug!(id, "resolving registered factory");
        factory()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn validate_id(id: &str) -> Result<(), LayerfigError> {
    let reason = if id.is_empty() {
        "identifier is empty"
    } else if !id.chars().all(|c| c.is_ascii_graphic()) {
        "identifiers must be printable ASCII without whitespace"
    } else {
        return Ok(());
    };
    Err(LayerfigError::InvalidIdentifier {
        id: id.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Small {
        workers: u32,
        name: &'static str,
    }

    #[test]
    fn resolves_registered_factory() {
        let registry = Registry::new()
            .with("presets:small", || Small { workers: 2, name: "small" })
            .unwrap();
        assert_eq!(
            registry.resolve("presets:small").unwrap(),
            json!({"workers": 2, "name": "small"}).into()
        );
    }

    #[test]
    fn factories_run_on_each_resolve() {
        use std::sync::atomic::{AtomicU32, Ordering};
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let registry = Registry::new()
            .with("count", move || counter.fetch_add(1, Ordering::SeqCst) + 1)
            .unwrap();
        assert_eq!(registry.resolve("count").unwrap(), json!(1).into());
        assert_eq!(registry.resolve("count").unwrap(), json!(2).into());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = Registry::new();
        assert!(matches!(
            registry.resolve("os.system"),
            Err(LayerfigError::UnknownIdentifier(id)) if id == "os.system"
        ));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registry = Registry::new();
        registry.register("a", || 1).unwrap();
        assert!(matches!(
            registry.register("a", || 2),
            Err(LayerfigError::DuplicateIdentifier(_))
        ));
        assert_eq!(registry.resolve("a").unwrap(), json!(1).into());
    }

    #[test]
    fn malformed_ids_are_rejected() {
        let mut registry = Registry::new();
        for id in ["", "has space", "tab\tid", "naïve"] {
            assert!(
                matches!(
                    registry.register(id, || 1),
                    Err(LayerfigError::InvalidIdentifier { .. })
                ),
                "{id:?}"
            );
        }
    }

    #[test]
    fn chained_registration_and_listing() {
        let mut registry = Registry::new();
        registry.register("b", || 1).unwrap().register("a", || 2).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert!(format!("{registry:?}").contains("\"a\""));
    }
}
