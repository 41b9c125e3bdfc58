//! The overlay compiler: fold a list of arguments into one tree.
//!
//! Starting from an empty object, each argument is classified ([`Token`]),
//! its value produced, and the value written into the accumulator. Later
//! arguments win. Assignments replace the subtree at their path outright;
//! only whole-tree tokens in [`WholeTree::MergeAnywhere`] mode merge.
//!
//! Errors stop the fold and carry the failing argument, its index, and the
//! full argument list.

use crate::error::LayerfigError;
use crate::file;
use crate::literal;
use crate::merge::merge;
use crate::path::{self, DotPath};
use crate::registry::Registry;
use crate::token::Token;
use crate::types::WholeTree;
use crate::value::{ConfigValue, MAX_DEPTH};

/// Settings that affect how arguments are compiled.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions<'a> {
    pub whole_tree: WholeTree,
    pub registry: &'a Registry,
}

/// Compile `args` into a single tree.
pub fn compile<S: AsRef<str>>(
    args: &[S],
    options: CompileOptions<'_>,
) -> Result<ConfigValue, LayerfigError> {
    compile_with_check(args, options, |_| Ok(()))
}

/// Compile `args`, running `check` on the accumulated tree after every
/// argument. A failing check is reported against that argument.
pub fn compile_with_check<S, F>(
    args: &[S],
    options: CompileOptions<'_>,
    mut check: F,
) -> Result<ConfigValue, LayerfigError>
where
    S: AsRef<str>,
    F: FnMut(&ConfigValue) -> Result<(), LayerfigError>,
{
    let mut acc = ConfigValue::object();
    for (index, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        acc = Token::parse(arg)
            .and_then(|token| apply(acc, &token, index, options))
            .and_then(|next| check(&next).map(|()| next))
            .map_err(|e| e.at_argument(index, arg, args))?;
        tracing::debug!(index, arg, "applied overlay argument");
    }
    Ok(acc)
}

fn apply(
    acc: ConfigValue,
    token: &Token,
    index: usize,
    options: CompileOptions<'_>,
) -> Result<ConfigValue, LayerfigError> {
    match token {
        Token::Assign { path, value } => assign(acc, path, literal::parse_scalar(value)?),
        Token::AssignJson { path, value } => assign(acc, path, literal::parse_json(value)?),
        Token::AssignFile { path, file } => assign(acc, path, file::load_document(file)?),
        Token::AssignFn { path, id } => assign(acc, path, options.registry.resolve(id)?),
        Token::WholeFile { file } => {
            check_position(token, index, options.whole_tree)?;
            whole_tree(acc, token, file::load_document(file)?, options.whole_tree)
        }
        Token::WholeFn { id } => {
            check_position(token, index, options.whole_tree)?;
            whole_tree(acc, token, options.registry.resolve(id)?, options.whole_tree)
        }
    }
}

fn assign(acc: ConfigValue, path: &DotPath, value: ConfigValue) -> Result<ConfigValue, LayerfigError> {
    let value = within_depth(value)?;
    Ok(path::assign(acc, path, value))
}

fn check_position(token: &Token, index: usize, mode: WholeTree) -> Result<(), LayerfigError> {
    if mode == WholeTree::FirstOnly && index != 0 {
        return Err(LayerfigError::MisplacedWholeTree { flag: token.flag() });
    }
    Ok(())
}

fn whole_tree(
    acc: ConfigValue,
    token: &Token,
    document: ConfigValue,
    mode: WholeTree,
) -> Result<ConfigValue, LayerfigError> {
    let document = within_depth(document)?.into_unwrapped();
    if !matches!(document, ConfigValue::Object(_)) {
        return Err(LayerfigError::NotAnObject {
            flag: token.flag(),
            kind: document.kind(),
        });
    }
    Ok(match mode {
        WholeTree::FirstOnly => document,
        WholeTree::MergeAnywhere => merge(acc, document),
    })
}

fn within_depth(value: ConfigValue) -> Result<ConfigValue, LayerfigError> {
    let depth = value.depth();
    if depth > MAX_DEPTH {
        return Err(LayerfigError::TooDeep {
            depth,
            limit: MAX_DEPTH,
        });
    }
    Ok(value)
}
