//! Minimal overlays between two configuration trees.
//!
//! [`diff_with`] is the inverse of [`merge_with`](crate::merge::merge_with):
//! for every atom-free target `to` and any policy `p`,
//! `merge_with(from, diff_with(&from, &to, &p), &p) == to`.
//!
//! Merge can add and overwrite but never delete. Whenever `to` drops an object
//! key or shortens an array, the change is not expressible incrementally and
//! the subtree is emitted as an [`Atom`](ConfigValue::Atom). The same happens
//! when the policy marks the pair, or the overlay built for it, as a leaf.

use crate::policy::{LeafPolicy, TypeTagChanged};
use crate::value::{ConfigValue, MAX_DEPTH, Map};

/// Diff with the default policy: a changed [`TYPE_TAG`](crate::policy::TYPE_TAG)
/// replaces the whole object.
pub fn diff(from: &ConfigValue, to: &ConfigValue) -> ConfigValue {
    diff_with(from, to, &TypeTagChanged)
}

/// The smallest overlay that turns `from` into `to` when merged with `policy`.
///
/// Objects list new keys first (in `to` order), then changed shared keys
/// (in `from` order). Unchanged keys are omitted. Arrays drop their trailing
/// run of unchanged elements.
pub fn diff_with<P>(from: &ConfigValue, to: &ConfigValue, policy: &P) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    diff_at(from, to, policy, 0)
}

fn diff_at<P>(from: &ConfigValue, to: &ConfigValue, policy: &P, depth: usize) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    if to.is_atom() {
        return to.clone();
    }

    match from {
        ConfigValue::Object(from_map) => {
            if depth >= MAX_DEPTH || policy.is_leaf(from, to) {
                return atom_of(to, "leaf");
            }
            match to {
                ConfigValue::Object(to_map) => {
                    let overlay = diff_objects(from_map, to_map, to, policy, depth);
                    settle(from, to, overlay, policy)
                }
                _ => to.clone(),
            }
        }
        ConfigValue::Array(from_items) => {
            if depth >= MAX_DEPTH || policy.is_leaf(from, to) {
                return atom_of(to, "leaf");
            }
            match to {
                ConfigValue::Array(to_items) => {
                    let overlay = diff_arrays(from_items, to_items, to, policy, depth);
                    settle(from, to, overlay, policy)
                }
                _ => to.clone(),
            }
        }
        // Scalars are always leaves for merge; the target itself is the update.
        _ => to.clone(),
    }
}

fn diff_objects<P>(
    from_map: &Map,
    to_map: &Map,
    to: &ConfigValue,
    policy: &P,
    depth: usize,
) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    if !from_map.keys().all(|key| to_map.contains_key(key)) {
        return atom_of(to, "removed keys");
    }

    let mut out = Map::new();
    for (key, to_val) in to_map {
        if !from_map.contains_key(key) {
            out.insert(key.clone(), to_val.clone());
        }
    }
    for (key, from_val) in from_map {
        let to_val = &to_map[key.as_str()];
        if from_val != to_val {
            out.insert(key.clone(), diff_at(from_val, to_val, policy, depth + 1));
        }
    }
    ConfigValue::Object(out)
}

fn diff_arrays<P>(
    from_items: &[ConfigValue],
    to_items: &[ConfigValue],
    to: &ConfigValue,
    policy: &P,
    depth: usize,
) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    if to_items.len() < from_items.len() {
        return atom_of(to, "shorter array");
    }

    // Elements past `stop` already match and are left out of the overlay.
    // Only possible when the lengths are equal.
    let mut stop = from_items.len();
    if to_items.len() == from_items.len() {
        while stop > 0 && from_items[stop - 1] == to_items[stop - 1] {
            stop -= 1;
        }
    }

    let mut out: Vec<ConfigValue> = from_items[..stop]
        .iter()
        .zip(to_items)
        .map(|(from_val, to_val)| diff_at(from_val, to_val, policy, depth + 1))
        .collect();
    if stop == from_items.len() {
        out.extend(to_items[from_items.len()..].iter().cloned());
    }
    ConfigValue::Array(out)
}

/// Merge asks the policy about `(from, overlay)`, not `(from, to)`. An
/// incremental overlay the policy would take as a leaf must carry all of `to`.
fn settle<P>(from: &ConfigValue, to: &ConfigValue, overlay: ConfigValue, policy: &P) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    if !overlay.is_atom() && policy.is_leaf(from, &overlay) {
        return atom_of(to, "leaf overlay");
    }
    overlay
}

fn atom_of(to: &ConfigValue, reason: &'static str) -> ConfigValue {
    tracing::trace!(reason, kind = to.kind(), "diff falls back to atom");
    ConfigValue::atom(to.clone())
}
