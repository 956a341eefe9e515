//! Source key resolution for a single field.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::Field;

/// Which spelling of the field's name found the value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum KeyTier {
    /// The rename, or the declared name when there is no rename.
    Candidate,
    /// The declared name, exactly as written.
    DeclaredName,
    /// The declared name with its first character lower-cased.
    LowerFirst,
}

/// A key present in the source document, and its value.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Resolved<'m> {
    pub key: &'m str,
    pub value: &'m Value,
    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    pub tier: KeyTier,
}

/// Finds the entry that supplies `field`.
///
/// Tries the candidate key, then (with `name_fallback`) the declared name and
/// its lower-first spelling. A key present with a `null` value still counts
/// as found.
pub(crate) fn resolve<'m>(
    field: &Field,
    map: &'m Map<String, Value>,
    name_fallback: bool,
) -> Option<Resolved<'m>> {
    let lookup = |key: &str, tier| {
        map.get_key_value(key).map(|(key, value)| Resolved {
            key: key.as_str(),
            value,
            tier,
        })
    };

    if let Some(found) = lookup(field.key(), KeyTier::Candidate) {
        return Some(found);
    }
    if !name_fallback {
        return None;
    }
    lookup(field.name, KeyTier::DeclaredName)
        .or_else(|| lookup(&*lower_first(field.name), KeyTier::LowerFirst))
}

/// Lower-cases the first character only: `FooBar` becomes `fooBar`.
///
/// The first character maps to exactly one character (`İd` becomes `id`).
pub(crate) fn lower_first(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(name);
    };
    // Only U+0130 lowercases to several chars; its simple mapping is the first.
    let lowered = first.to_lowercase().next().unwrap_or(first);
    if lowered == first {
        return Cow::Borrowed(name);
    }
    let mut owned = String::with_capacity(name.len());
    owned.push(lowered);
    owned.push_str(chars.as_str());
    Cow::Owned(owned)
}
