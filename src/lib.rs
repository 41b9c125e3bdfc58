//! Layered configuration trees with structural merge, minimal diff, and a
//! command-line overlay compiler.
//!
//! Layerfig treats configuration as a JSON-like tree ([`ConfigValue`]) and
//! provides three operations over it:
//!
//! - [`merge()`] lays a sparse overlay on top of a base tree.
//! - [`diff()`] computes the smallest overlay that turns one tree into another.
//! - The compiler folds arguments such as `server.port=8080` or
//!   `--from-file=base.yaml` into an overlay tree.
//!
//! ```ignore
//! let config: AppConfig = Layerfig::builder()
//!     .registry(presets)
//!     .load(&["--from-fn=presets:prod", "server.port=8080"])?;
//! ```
//!
//! # Merge and diff
//!
//! Merge recurses into objects key by key and into arrays element by element.
//! Keys are never deleted, so an overlay can only add or change. Where a
//! value must replace its counterpart instead of being merged into it, the
//! overlay marks it as an [`Atom`](ConfigValue::Atom).
//!
//! Diff emits atoms exactly where a plain merge could not reach the target:
//! keys removed, arrays shortened, or a [`LeafPolicy`] deciding that a pair is
//! indivisible. For any trees `a` and `b` without atoms,
//! `merge(a, diff(a, b)) == b`.
//!
//! Both engines take an optional leaf policy. Merge defaults to [`Never`]
//! (always recurse); diff defaults to [`TypeTagChanged`], so an object whose
//! [`TYPE_TAG`] changes is replaced instead of patched.
//!
//! # Overlay arguments
//!
//! ```text
//! key.path=VALUE              JSON if it parses, else the raw string
//! --set=key.path=VALUE        same, allows keys starting with '-'
//! --set-json=key.path=JSON    strict JSON
//! --set-from-file=key=FILE    YAML, JSON or TOML document (by extension)
//! --set-from-fn=key=ID        value of a registered factory
//! --from-file=FILE            whole tree from a document
//! --from-fn=ID                whole tree from a registered factory
//! ```
//!
//! Arguments apply left to right and later ones win. An assignment replaces
//! the whole subtree at its path. Whole-tree tokens are only accepted first
//! unless the builder is set to [`WholeTree::MergeAnywhere`].
//!
//! Factories live in a [`Registry`] owned by the host program; arguments can
//! name a factory but never anything else.
//!
//! Going the other way, [`to_cli_args`] renders an overlay as arguments, and
//! [`LayerfigBuilder::updates_to_args`] turns a sequence of in-code edits to a
//! typed value into the argument list that reproduces them.
//!
//! # Core library, no CLI framework required
//!
//! Everything above works on plain string slices. For
//! [clap](https://docs.rs/clap) users, an optional adapter (the `cli` module,
//! behind the `clap` Cargo feature, on by default) provides [`OverlayArgs`],
//! a flattenable struct that collects trailing overlay arguments. To use
//! layerfig without clap:
//!
//! ```toml
//! layerfig = { version = "...", default-features = false }
//! ```
//!
//! # Typed configs
//!
//! Compiled trees bind to any serde type ([`LayerfigBuilder::parse`]) or to a
//! [confique](https://docs.rs/confique) config ([`LayerfigBuilder::load`]),
//! where `#[config(default = ...)]` values fill whatever the overlay leaves
//! out. In strict mode (the default) keys the config does not declare are
//! errors. The `_checked` variants validate after every argument, so a typo
//! is reported against the argument that introduced it.

pub mod diff;
pub mod error;
pub mod literal;
pub mod mapper;
pub mod merge;
pub mod path;
pub mod policy;
pub mod token;
pub mod types;
pub mod value;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod compile;
mod file;
mod registry;
mod replay;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Layerfig, LayerfigBuilder};
#[cfg(feature = "clap")]
pub use cli::OverlayArgs;
pub use compile::{CompileOptions, compile, compile_with_check};
pub use diff::{diff, diff_with};
pub use error::LayerfigError;
pub use file::load_document;
pub use merge::{merge, merge_with};
pub use path::{DotPath, UnaddressableKeys, assign, decode, encode, to_cli_args};
pub use policy::{
    ArrayGrowth, Either, LeafPolicy, Never, SequenceIfDifferent, TYPE_TAG, TypeTagChanged,
};
pub use registry::Registry;
pub use replay::updates_to_args;
pub use types::{DocumentFormat, WholeTree};
pub use validate::validate_unknown_keys;
pub use value::{ConfigValue, MAX_DEPTH, Map};
