//! HCL (`.tf`) patching.
//!
//! Uses `hcl-edit`, which keeps whitespace and comments, so everything except
//! the patched attribute value is written back unchanged. Only top-level
//! attributes are addressable. Keys inside blocks are never matched.

use std::path::Path;

use hcl_edit::expr::Expression;
use hcl_edit::structure::{Attribute, Body};
use hcl_edit::{Decorate, Ident};
use tracing::debug;

use crate::error::SurveyError;
use crate::persist;
use crate::types::Answer;

/// Pure function: set the top-level attribute `key` to a string value.
///
/// An existing attribute keeps its position, its surrounding whitespace and
/// any trailing comment. A missing attribute is appended to the end of the
/// body. Multiselect answers are stored joined with `,`.
pub fn set_in_document(
    path: &Path,
    content: &str,
    key: &str,
    answer: &Answer,
) -> Result<String, SurveyError> {
    let mut source = content.to_string();
    if !source.is_empty() && !source.ends_with('\n') {
        source.push('\n');
    }

    let mut body: Body = hcl_edit::parser::parse_body(&source).map_err(|e| {
        SurveyError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let value = answer.joined();
    match body.get_attribute_mut(key) {
        Some(mut attr) => {
            let decor = attr.value_mut().decor().clone();
            let mut expr = Expression::from(value);
            *expr.decor_mut() = decor;
            *attr.value_mut() = expr;
        }
        None => {
            let ident = Ident::try_new(key).map_err(|e| SurveyError::InvalidKey {
                key: key.into(),
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            debug!(key, "attribute not found, appending");
            body.push(Attribute::new(ident, value));
        }
    }

    Ok(body.to_string())
}

/// I/O wrapper: read the file, set one attribute, write it back keeping its
/// mode. Nothing is written when the file does not parse.
pub fn patch_file(path: &Path, key: &str, answer: &Answer) -> Result<(), SurveyError> {
    let content = persist::read(path)?;
    let updated = set_in_document(path, &content, key, answer)?;
    persist::write_preserving_mode(path, &updated)
}
