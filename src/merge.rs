use crate::policy::{LeafPolicy, Never};
use crate::value::{ConfigValue, MAX_DEPTH};

/// Merge `overlay` on top of `base` with the default policy (always recurse).
pub fn merge(base: ConfigValue, overlay: ConfigValue) -> ConfigValue {
    merge_with(base, overlay, &Never)
}

/// Merge `overlay` on top of `base`.
///
/// - An `Atom` overlay replaces the base with its contents.
/// - A leaf pair (per `policy`) is replaced by the overlay.
/// - Two objects merge key by key: shared keys recurse, new keys are appended
///   in overlay order, base-only keys are kept.
/// - Two arrays merge element by element; the longer side supplies the tail.
/// - Anything else: the overlay wins.
///
/// Never fails and never deletes keys.
pub fn merge_with<P>(base: ConfigValue, overlay: ConfigValue, policy: &P) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    merge_at(base, overlay, policy, 0)
}

fn merge_at<P>(base: ConfigValue, overlay: ConfigValue, policy: &P, depth: usize) -> ConfigValue
where
    P: LeafPolicy + ?Sized,
{
    if overlay.is_atom() {
        return overlay.into_unwrapped();
    }
    if depth >= MAX_DEPTH || policy.is_leaf(&base, &overlay) {
        return overlay;
    }

    match (base, overlay) {
        (ConfigValue::Object(mut base_map), ConfigValue::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_val = std::mem::take(slot);
                        *slot = merge_at(base_val, overlay_val, policy, depth + 1);
                    }
                    None => {
                        base_map.insert(key, overlay_val);
                    }
                }
            }
            ConfigValue::Object(base_map)
        }
        (ConfigValue::Array(base_items), ConfigValue::Array(overlay_items)) => {
            let mut out = Vec::with_capacity(base_items.len().max(overlay_items.len()));
            let mut base_iter = base_items.into_iter();
            let mut overlay_iter = overlay_items.into_iter();
            loop {
                match (base_iter.next(), overlay_iter.next()) {
                    (Some(b), Some(o)) => out.push(merge_at(b, o, policy, depth + 1)),
                    (Some(b), None) => {
                        out.push(b);
                        out.extend(base_iter);
                        break;
                    }
                    (None, Some(o)) => {
                        out.push(o);
                        out.extend(overlay_iter);
                        break;
                    }
                    (None, None) => break,
                }
            }
            ConfigValue::Array(out)
        }
        (_, overlay) => overlay,
    }
}
