//! Safe extraction of possibly-absent nested keys.
//!
//! Source documents omit whole sub-structures freely (no toss, no outcome,
//! no player-of-match list), so every optional read goes through these
//! helpers and degrades to a caller-supplied default instead of aborting the
//! match.

use crate::flatten::error::FlattenError;
use serde_json::{Map, Value};

/// View a parsed document as an object.
///
/// This is the only structural requirement the transforms place on a
/// document; everything below the top level is optional.
pub fn document_object(doc: &Value) -> Result<&Map<String, Value>, FlattenError> {
    doc.as_object().ok_or(FlattenError::NotAnObject)
}

/// Walk a staged key path into a JSON object tree.
///
/// Returns `None` if any key is absent or an intermediate value is not an
/// object.
pub fn get_path<'a>(root: &'a Map<String, Value>, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = root.get(*first)?;
    for key in rest {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// String at `path`, or `default` when absent or not a string.
pub fn str_or<'a>(root: &'a Map<String, Value>, path: &[&str], default: &'a str) -> &'a str {
    get_path(root, path).and_then(Value::as_str).unwrap_or(default)
}

/// Nullable string at `path`.
pub fn opt_str(root: &Map<String, Value>, path: &[&str]) -> Option<String> {
    get_path(root, path)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Non-negative integer at `path`, or `default` when absent or not a number.
pub fn u64_or(root: &Map<String, Value>, path: &[&str], default: u64) -> u64 {
    get_path(root, path).and_then(Value::as_u64).unwrap_or(default)
}

/// First element of the string list at `path`, or `default`.
pub fn first_str_or<'a>(root: &'a Map<String, Value>, path: &[&str], default: &'a str) -> &'a str {
    get_path(root, path)
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .unwrap_or(default)
}

/// String list at `path`. Non-string elements are skipped; absent or
/// wrong-shaped values yield an empty list.
pub fn str_list(root: &Map<String, Value>, path: &[&str]) -> Vec<String> {
    get_path(root, path)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
