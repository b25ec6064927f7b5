//! INI and dotenv patching.
//!
//! A target key `SECTION__NAME` addresses `NAME` inside `[SECTION]`; the split
//! happens at the first `__`. Keys without a separator go to the general
//! section. Dotenv files only have the general section, are written as
//! `KEY=value` and have their keys upper-cased.
//!
//! All answers are applied to one loaded document, which is saved once.
//! Existing keys keep their position; new keys are appended to their section.
//! Values are loaded and written verbatim, quotes included. Comments in the
//! original file are not kept.

use std::path::Path;

use ::ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use tracing::debug;

use crate::error::SurveyError;
use crate::persist;
use crate::types::Answers;

const SECTION_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Ini,
    DotEnv,
}

impl Flavor {
    fn kv_separator(self) -> &'static str {
        match self {
            Flavor::Ini => " = ",
            Flavor::DotEnv => "=",
        }
    }
}

/// Split `key` into an optional section and a property name.
///
/// ```text
/// DB__HOST      -> (Some("DB"), "HOST")
/// DB__POOL__MAX -> (Some("DB"), "POOL__MAX")
/// PORT          -> (None, "PORT")
/// __PORT        -> (None, "__PORT")
/// ```
pub fn split_key(key: &str) -> (Option<&str>, &str) {
    match key.split_once(SECTION_SEPARATOR) {
        Some((section, name)) if !section.is_empty() => (Some(section), name),
        _ => (None, key),
    }
}

/// Pure function: apply every answer to an INI or dotenv document string.
pub fn set_in_document(
    path: &Path,
    content: &str,
    flavor: Flavor,
    answers: &Answers,
) -> Result<String, SurveyError> {
    let opt = ParseOption {
        enabled_escape: false,
        enabled_quote: false,
        ..ParseOption::default()
    };
    let mut doc = Ini::load_from_str_opt(content, opt).map_err(|e| SurveyError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for (key, answer) in answers.iter() {
        let value = answer.joined();
        match flavor {
            Flavor::DotEnv => {
                let name = key.to_uppercase();
                debug!(key = %name, "setting dotenv key");
                set_in_section(&mut doc, None, &name, value);
            }
            Flavor::Ini => {
                let (section, name) = split_key(key);
                if name.is_empty() {
                    return Err(SurveyError::InvalidKey {
                        key: key.into(),
                        path: path.to_path_buf(),
                        reason: "empty property name after section separator".into(),
                    });
                }
                debug!(section = section.unwrap_or(""), key = name, "setting ini key");
                set_in_section(&mut doc, section, name, value);
            }
        }
    }

    let mut buf = Vec::new();
    doc.write_to_opt(
        &mut buf,
        WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: flavor.kv_separator(),
            ..WriteOption::default()
        },
    )
    .map_err(|e| SurveyError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    String::from_utf8(buf).map_err(|e| SurveyError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Overwrite the first `name` in `section` where it stands, or append it.
fn set_in_section(doc: &mut Ini, section: Option<&str>, name: &str, value: String) {
    if let Some(props) = doc.section_mut(section) {
        if let Some((_, slot)) = props.iter_mut().find(|(k, _)| *k == name) {
            *slot = value;
            return;
        }
    }
    doc.with_section(section).set(name, value);
}

/// I/O wrapper: load the file once, apply every answer, save once keeping the
/// file's mode.
pub fn patch_file(path: &Path, flavor: Flavor, answers: &Answers) -> Result<(), SurveyError> {
    let content = persist::read(path)?;
    let updated = set_in_document(path, &content, flavor, answers)?;
    persist::write_preserving_mode(path, &updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Answer;
    use std::fs;
    use tempfile::TempDir;

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs.iter().map(|(k, v)| (*k, Answer::from(*v))).collect()
    }

    fn reload(s: &str) -> Ini {
        Ini::load_from_str(s).unwrap()
    }

    #[test]
    fn split_on_first_separator() {
        assert_eq!(split_key("DB__HOST"), (Some("DB"), "HOST"));
        assert_eq!(split_key("DB__POOL__MAX"), (Some("DB"), "POOL__MAX"));
        assert_eq!(split_key("PORT"), (None, "PORT"));
        assert_eq!(split_key("__PORT"), (None, "__PORT"));
        assert_eq!(split_key("single_underscore"), (None, "single_underscore"));
    }

    #[test]
    fn section_and_general_keys() {
        let out = set_in_document(
            Path::new("app.ini"),
            "",
            Flavor::Ini,
            &answers(&[("DB__HOST", "x"), ("PORT", "5432")]),
        )
        .unwrap();
        let doc = reload(&out);
        assert_eq!(doc.get_from(Some("DB"), "HOST"), Some("x"));
        assert_eq!(doc.get_from(None::<String>, "PORT"), Some("5432"));
    }

    #[test]
    fn existing_values_are_replaced_and_others_kept() {
        let content = "name = demo\n\n[DB]\nHOST = old\nUSER = admin\n";
        let out = set_in_document(
            Path::new("app.ini"),
            content,
            Flavor::Ini,
            &answers(&[("DB__HOST", "new")]),
        )
        .unwrap();
        let doc = reload(&out);
        assert_eq!(doc.get_from(Some("DB"), "HOST"), Some("new"));
        assert_eq!(doc.get_from(Some("DB"), "USER"), Some("admin"));
        assert_eq!(doc.get_from(None::<String>, "name"), Some("demo"));
        assert!(out.contains("HOST = new"));
    }

    #[test]
    fn empty_property_name_rejected() {
        let err = set_in_document(
            Path::new("app.ini"),
            "",
            Flavor::Ini,
            &answers(&[("DB__", "x")]),
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::InvalidKey { .. }));
    }

    #[test]
    fn dotenv_upper_cases_and_skips_alignment() {
        let out = set_in_document(
            Path::new(".env"),
            "EXISTING=1\n",
            Flavor::DotEnv,
            &answers(&[("db_host", "localhost"), ("existing", "2")]),
        )
        .unwrap();
        assert_eq!(out, "EXISTING=2\nDB_HOST=localhost\n");
    }

    #[test]
    fn updated_keys_keep_their_position() {
        let out = set_in_document(
            Path::new("app.ini"),
            "[DB]\nHOST = old\nUSER = admin\n",
            Flavor::Ini,
            &answers(&[("DB__HOST", "new")]),
        )
        .unwrap();
        assert_eq!(out, "[DB]\nHOST = new\nUSER = admin\n");

        let out = set_in_document(
            Path::new(".env"),
            "FIRST=1\nSECOND=2\nTHIRD=3\n",
            Flavor::DotEnv,
            &answers(&[("first", "one"), ("fourth", "4")]),
        )
        .unwrap();
        assert_eq!(out, "FIRST=one\nSECOND=2\nTHIRD=3\nFOURTH=4\n");
    }

    #[test]
    fn quoted_values_pass_through() {
        let out = set_in_document(
            Path::new(".env"),
            "GREETING=\"hello world\"\nPADDED=\" x \"\n",
            Flavor::DotEnv,
            &answers(&[("other", "x")]),
        )
        .unwrap();
        assert_eq!(out, "GREETING=\"hello world\"\nPADDED=\" x \"\nOTHER=x\n");
    }

    #[test]
    fn dotenv_does_not_split_sections() {
        let out = set_in_document(
            Path::new(".env"),
            "",
            Flavor::DotEnv,
            &answers(&[("db__host", "h")]),
        )
        .unwrap();
        assert_eq!(out, "DB__HOST=h\n");
    }

    #[test]
    fn backslashes_survive() {
        let out = set_in_document(
            Path::new("app.ini"),
            "",
            Flavor::Ini,
            &answers(&[("path", r"C:\data\dir")]),
        )
        .unwrap();
        assert_eq!(out, "path = C:\\data\\dir\n");
    }

    #[test]
    fn list_answer_joined() {
        let mut a = Answers::new();
        a.insert("ZONES", Answer::List(vec!["a".into(), "b".into()]));
        let out = set_in_document(Path::new(".env"), "", Flavor::DotEnv, &a).unwrap();
        assert_eq!(out, "ZONES=a,b\n");
    }

    #[test]
    fn patch_file_saves_once_with_all_answers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[DB]\nHOST = old\n").unwrap();

        patch_file(
            &path,
            Flavor::Ini,
            &answers(&[("DB__HOST", "new"), ("DB__PORT", "5432"), ("DEBUG", "true")]),
        )
        .unwrap();

        let doc = Ini::load_from_file(&path).unwrap();
        assert_eq!(doc.get_from(Some("DB"), "HOST"), Some("new"));
        assert_eq!(doc.get_from(Some("DB"), "PORT"), Some("5432"));
        assert_eq!(doc.get_from(None::<String>, "DEBUG"), Some("true"));
    }
}
