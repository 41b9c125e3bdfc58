//! Leaf policies: decide where merge and diff stop recursing.
//!
//! A policy is consulted with the `(from, to)` pair at a position. When it
//! returns `true` the pair is an indivisible leaf: merge overwrites, diff emits
//! an [`Atom`](ConfigValue::Atom). Merge passes the overlay as `to`, so diff
//! also emits an atom when the overlay it built would be a leaf. Policies must
//! be pure; they are called at arbitrary positions in no particular order.

use crate::value::ConfigValue;

/// Reserved object key naming the concrete type of a polymorphic value.
pub const TYPE_TAG: &str = "_type_";

/// Decides whether a `(from, to)` pair is an indivisible leaf.
pub trait LeafPolicy {
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool;
}

impl<F> LeafPolicy for F
where
    F: Fn(&ConfigValue, &ConfigValue) -> bool,
{
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool {
        self(from, to)
    }
}

/// Always recurse. Default for merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl LeafPolicy for Never {
    fn is_leaf(&self, _from: &ConfigValue, _to: &ConfigValue) -> bool {
        false
    }
}

/// Two objects carrying different [`TYPE_TAG`] values are a leaf: a changed
/// concrete type is replaced, never patched. Default for diff.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeTagChanged;

impl LeafPolicy for TypeTagChanged {
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool {
        match (from.get(TYPE_TAG), to.get(TYPE_TAG)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        }
    }
}

/// Any array target that differs from its source is a leaf.
///
/// CLI tokens can only replace whole arrays, so diffs meant to be rendered as
/// arguments use this policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceIfDifferent;

impl LeafPolicy for SequenceIfDifferent {
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool {
        matches!(to, ConfigValue::Array(_)) && from != to
    }
}

/// An array target longer than its source is a leaf.
///
/// The stricter array policy: diff never grows an array incrementally, it
/// replaces it. Shrinking is already an atom under every policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayGrowth;

impl LeafPolicy for ArrayGrowth {
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool {
        match (from, to) {
            (ConfigValue::Array(a), ConfigValue::Array(b)) => b.len() > a.len(),
            _ => false,
        }
    }
}

/// Leaf when either policy says so.
#[derive(Debug, Clone, Copy, Default)]
pub struct Either<A, B>(pub A, pub B);

impl<A: LeafPolicy, B: LeafPolicy> LeafPolicy for Either<A, B> {
    fn is_leaf(&self, from: &ConfigValue, to: &ConfigValue) -> bool {
        self.0.is_leaf(from, to) || self.1.is_leaf(from, to)
    }
}
