#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for resolving `$ref` targets inside a single specification
//! document. No external documents are ever fetched: a reference is reduced
//! to its trailing pointer segment and looked up in `definitions`.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

/// Maximum `allOf` chain length followed during model-name resolution.
///
/// Well-formed Swagger documents keep composition chains short; hitting this
/// cap means the chain is cyclic or malformed, and resolution degrades to no
/// model instead of recursing without bound.
pub(crate) const MAX_ALL_OF_DEPTH: usize = 32;

/// Extracts the model name from a `$ref` such as
/// `#/definitions/NetworkObject`: the trailing segment, JSON-Pointer decoded.
///
/// Returns `None` for refs with an empty trailing segment.
pub(crate) fn model_name_from_ref(ref_str: &str) -> Option<String> {
    let segment = ref_str.rsplit('/').next().unwrap_or(ref_str);
    let name = decode_pointer_segment(segment);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Resolves a `$ref` to the name of the model that ultimately governs it.
///
/// A definition carrying an `allOf` list is a composition: the governing
/// model is the one referenced by the FIRST `allOf` element, resolved
/// recursively. Resolution degrades to `None` when the target is not a known
/// definition or the chain exceeds [`MAX_ALL_OF_DEPTH`].
pub(crate) fn resolve_model_ref(
    definitions: &Map<String, Value>,
    ref_str: &str,
) -> Option<String> {
    resolve_at_depth(definitions, ref_str, 0)
}

fn resolve_at_depth(
    definitions: &Map<String, Value>,
    ref_str: &str,
    depth: usize,
) -> Option<String> {
    if depth > MAX_ALL_OF_DEPTH {
        return None;
    }
    let name = model_name_from_ref(ref_str)?;
    let definition = definitions.get(&name)?;
    let base_ref = definition
        .get("allOf")
        .and_then(Value::as_array)
        .and_then(|chain| chain.first())
        .and_then(|base| base.get("$ref"))
        .and_then(Value::as_str);
    match base_ref {
        Some(base_ref) => resolve_at_depth(definitions, base_ref, depth + 1),
        None => Some(name),
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
