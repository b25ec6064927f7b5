//! YAML patching.
//!
//! The document is parsed into a generic [`Value`] tree and searched for the
//! first mapping entry whose key is the target, in pre-order and document
//! order. Only mappings are descended into; sequences and tagged nodes are
//! leaves. When no entry matches, the key is appended to the root mapping.
//!
//! The file is re-serialized, so comments and quoting style are not kept.

use std::path::Path;

use serde_yaml_ng::{Mapping, Value};
use tracing::debug;

use crate::error::SurveyError;
use crate::persist;
use crate::types::Answer;

/// Pure function: set `key` to `answer` in a YAML document string.
///
/// Empty and null documents are treated as an empty mapping. A document whose
/// root is not a mapping is rejected. `path` is only used for diagnostics.
pub fn set_in_document(
    path: &Path,
    content: &str,
    key: &str,
    answer: &Answer,
) -> Result<String, SurveyError> {
    let mut root: Value = if content.trim().is_empty() {
        Value::Mapping(Mapping::new())
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| SurveyError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    if root.is_null() {
        root = Value::Mapping(Mapping::new());
    }

    let new_value = to_node(answer);
    match &mut root {
        Value::Mapping(map) => {
            if !replace_first(map, key, &new_value) {
                debug!(key, "key not found, inserting at document root");
                map.insert(Value::String(key.to_string()), new_value);
            }
        }
        _ => {
            return Err(SurveyError::ParseError {
                path: path.to_path_buf(),
                reason: "document root is not a mapping".into(),
            });
        }
    }

    serde_yaml_ng::to_string(&root).map_err(|e| SurveyError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// I/O wrapper: read the file, patch one key, write it back keeping its mode.
pub fn patch_file(path: &Path, key: &str, answer: &Answer) -> Result<(), SurveyError> {
    let content = persist::read(path)?;
    let updated = set_in_document(path, &content, key, answer)?;
    persist::write_preserving_mode(path, &updated)
}

fn to_node(answer: &Answer) -> Value {
    match answer {
        Answer::Text(s) => Value::String(s.clone()),
        Answer::List(items) => {
            Value::Sequence(items.iter().cloned().map(Value::String).collect())
        }
    }
}

/// Overwrite the value of the first entry keyed `key`, searching `map` and
/// then each nested mapping in document order. Returns whether a match was
/// found.
fn replace_first(map: &mut Mapping, key: &str, new_value: &Value) -> bool {
    for (k, v) in map.iter_mut() {
        if matches!(k, Value::String(s) if s == key) {
            *v = new_value.clone();
            return true;
        }
        if let Value::Mapping(child) = v
            && replace_first(child, key, new_value)
        {
            return true;
        }
    }
    false
}
