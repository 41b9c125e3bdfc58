use confique::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::compile::{self, CompileOptions};
use crate::error::LayerfigError;
use crate::mapper;
use crate::registry::Registry;
use crate::replay;
use crate::types::WholeTree;
use crate::validate;
use crate::value::ConfigValue;

/// Entry point for compiling configuration overlays.
pub struct Layerfig;

impl Layerfig {
    pub fn builder() -> LayerfigBuilder {
        LayerfigBuilder::new()
    }
}

/// Builder holding the settings shared by every compilation.
///
/// Terminal operations borrow the builder, so one instance can compile any
/// number of argument lists.
#[derive(Debug, Clone)]
pub struct LayerfigBuilder {
    whole_tree: WholeTree,
    registry: Registry,
    strict: bool,
}

impl LayerfigBuilder {
    fn new() -> Self {
        Self {
            whole_tree: WholeTree::default(),
            registry: Registry::new(),
            strict: true,
        }
    }

    /// Set how `--from-file=` and `--from-fn=` are accepted
    /// (default: [`WholeTree::FirstOnly`]).
    pub fn whole_tree(mut self, mode: WholeTree) -> Self {
        self.whole_tree = mode;
        self
    }

    /// Set the factories reachable through `--from-fn=` and `--set-from-fn=`.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In strict mode, keys unknown to the config type produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn options(&self) -> CompileOptions<'_> {
        CompileOptions {
            whole_tree: self.whole_tree,
            registry: &self.registry,
        }
    }

    /// Compile `args` into a tree.
    pub fn compile<S: AsRef<str>>(&self, args: &[S]) -> Result<ConfigValue, LayerfigError> {
        compile::compile(args, self.options())
    }

    /// Compile `args` and deserialize the result into `T`.
    pub fn parse<T, S>(&self, args: &[S]) -> Result<T, LayerfigError>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        mapper::bind(&self.compile(args)?)
    }

    /// Like [`parse`](Self::parse), but the partial tree must deserialize into
    /// `T` after every argument, so a bad key or value is reported against the
    /// argument that introduced it. `T` must accept partial input, typically
    /// through `#[serde(default)]`.
    pub fn parse_checked<T, S>(&self, args: &[S]) -> Result<T, LayerfigError>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        let tree = compile::compile_with_check(args, self.options(), |acc| {
            mapper::bind::<T>(acc).map(drop)
        })?;
        mapper::bind(&tree)
    }

    /// Compile `args` into a confique config. Missing fields take their
    /// declared defaults.
    pub fn load<C, S>(&self, args: &[S]) -> Result<C, LayerfigError>
    where
        C: Config,
        C::Layer: for<'de> Deserialize<'de>,
        S: AsRef<str>,
    {
        let tree = self.compile(args)?;
        mapper::bind_config(&tree, self.strict)
    }

    /// Like [`load`](Self::load), but the partial tree is checked against
    /// `C::Layer` after every argument.
    pub fn load_checked<C, S>(&self, args: &[S]) -> Result<C, LayerfigError>
    where
        C: Config,
        C::Layer: for<'de> Deserialize<'de>,
        S: AsRef<str>,
    {
        let strict = self.strict;
        let tree = compile::compile_with_check(args, self.options(), |acc| {
            if strict {
                validate::validate_unknown_keys::<C>(acc)?;
            }
            mapper::bind_layer::<C>(acc).map(drop)
        })?;
        mapper::bind_config(&tree, strict)
    }

    /// Apply `updates` to the value of factory `id` and return the arguments
    /// that reproduce the result. See [`replay::updates_to_args`].
    pub fn updates_to_args<T, U>(
        &self,
        id: &str,
        updates: &[U],
    ) -> Result<(Vec<String>, T), LayerfigError>
    where
        T: Serialize + DeserializeOwned,
        U: Fn(&mut T),
    {
        replay::updates_to_args(&self.registry, id, updates)
    }
}
