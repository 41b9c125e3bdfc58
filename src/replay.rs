//! Turn a sequence of in-code edits into equivalent overlay arguments.
//!
//! Starting from a registered factory, each update mutates a typed value.
//! The change it made is diffed and rendered as assignment tokens, so that
//! compiling `--from-fn=ID` followed by the emitted tokens rebuilds the
//! final value.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::diff::diff_with;
use crate::error::LayerfigError;
use crate::mapper;
use crate::merge::merge;
use crate::path::{self, UnaddressableKeys};
use crate::policy::{Either, SequenceIfDifferent, TypeTagChanged};
use crate::registry::Registry;
use crate::token::Token;

/// Apply `updates` in order to the value produced by factory `id`.
///
/// Returns the argument list that reproduces the result, and the result
/// itself. Arrays that change are replaced whole, as are objects whose
/// [`TYPE_TAG`](crate::policy::TYPE_TAG) changes and objects whose keys
/// cannot be written as path segments.
pub fn updates_to_args<T, U>(
    registry: &Registry,
    id: &str,
    updates: &[U],
) -> Result<(Vec<String>, T), LayerfigError>
where
    T: Serialize + DeserializeOwned,
    U: Fn(&mut T),
{
    let policy = Either(TypeTagChanged, Either(SequenceIfDifferent, UnaddressableKeys));

    let mut tree = registry.resolve(id)?;
    let mut current: T = mapper::bind(&tree)?;
    let mut args = vec![Token::WholeFn { id: id.to_string() }.to_string()];

    for (step, update) in updates.iter().enumerate() {
        update(&mut current);
        let next = mapper::unbind(&current)?;
        if next == tree {
            continue;
        }
        let overlay = diff_with(&tree, &next, &policy);
        let tokens = path::to_cli_args(&overlay)?;
        tracing::debug!(step, count = tokens.len(), "rendered update as arguments");
        args.extend(tokens);
        tree = merge(tree, overlay);
        debug_assert_eq!(tree, next);
    }
    Ok((args, current))
}
