//! Tool settings.
//!
//! Settings are layered, lowest priority first:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//! Platform config       <config dir>/aa-survey/aa-survey.toml
//! Working directory     ./aa-survey.toml
//! Explicit file         --config <path>
//! Environment           AA_SURVEY_<KEY>
//! ```
//!
//! Command-line flags are applied on top by the caller. Missing discovered
//! files are skipped; a missing explicit file is an error. Unknown keys in a
//! settings file are rejected.
//!
//! Resolution ([`resolve`]) works on pre-loaded file contents and environment
//! pairs, so the whole pipeline is testable without touching the real
//! filesystem or process environment.

use std::path::{Path, PathBuf};

use confique::Config;
use toml::{Table, Value};

use crate::error::SurveyError;

pub const APP_NAME: &str = "aa-survey";
pub const FILE_NAME: &str = "aa-survey.toml";
pub const ENV_PREFIX: &str = "AA_SURVEY_";

#[derive(Config, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Questionnaire file used when --survey is not given.
    #[config(default = "Surveyfile.yaml")]
    pub survey: PathBuf,

    /// Ask "All correct?" after writing and offer to open an editor.
    #[config(default = false)]
    pub check: bool,

    /// Editor command tried after VISUAL and EDITOR, e.g. "code --wait".
    pub editor: Option<String>,

    /// Log filter used when neither --log-level nor RUST_LOG is set.
    #[config(default = "warn")]
    pub log_level: String,
}

/// Pre-loaded settings sources. No I/O happens during resolution.
#[derive(Debug, Default)]
pub struct SettingsInput {
    /// File contents, lowest priority first.
    pub files: Vec<(PathBuf, String)>,
    /// Raw environment pairs.
    pub env_vars: Vec<(String, String)>,
}

/// Load settings from the standard locations, `explicit` and the process
/// environment.
pub fn load(explicit: Option<&Path>) -> Result<Settings, SurveyError> {
    let files = discover(explicit)?;
    resolve(SettingsInput {
        files,
        env_vars: std::env::vars().collect(),
    })
}

/// Merge the layers of `input` on top of the compiled defaults.
pub fn resolve(input: SettingsInput) -> Result<Settings, SurveyError> {
    let mut merged = Table::new();
    for (path, content) in &input.files {
        check_unknown_keys(content, path)?;
        let table: Table = toml::from_str(content).map_err(|e| SurveyError::ParseError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        merged.extend(table);
    }
    merged.extend(env_to_table(input.env_vars));

    let layer: <Settings as Config>::Layer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| SurveyError::ParseError {
                path: PathBuf::from("<settings>"),
                reason: e.to_string(),
            })?;

    Settings::builder()
        .preloaded(layer)
        .load()
        .map_err(SurveyError::from)
}

/// A commented TOML template of every setting and its default.
pub fn template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}

/// Candidate settings files, lowest priority first.
pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
        paths.push(dirs.config_dir().join(FILE_NAME));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(FILE_NAME));
    }
    if let Some(p) = explicit {
        paths.push(p.to_path_buf());
    }
    paths
}

fn discover(explicit: Option<&Path>) -> Result<Vec<(PathBuf, String)>, SurveyError> {
    let mut found = Vec::new();
    for path in search_paths(explicit) {
        let is_explicit = explicit == Some(path.as_path());
        match std::fs::read_to_string(&path) {
            Ok(content) => found.push((path, content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !is_explicit => {}
            Err(e) => return Err(SurveyError::IoError { path, source: e }),
        }
    }
    Ok(found)
}

/// Build a table from `AA_SURVEY_<KEY>` variables. Keys are lower-cased.
/// `true` and `false` (any case) become booleans; everything else stays a
/// string.
fn env_to_table(vars: impl IntoIterator<Item = (String, String)>) -> Table {
    let mut table = Table::new();
    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let parsed = if value.eq_ignore_ascii_case("true") {
            Value::Boolean(true)
        } else if value.eq_ignore_ascii_case("false") {
            Value::Boolean(false)
        } else {
            Value::String(value)
        };
        table.insert(rest.to_lowercase(), parsed);
    }
    table
}

fn check_unknown_keys(content: &str, path: &Path) -> Result<(), SurveyError> {
    let mut unknown: Vec<String> = Vec::new();
    let deserializer = toml::Deserializer::new(content);
    let _layer: <Settings as Config>::Layer =
        serde_ignored::deserialize(deserializer, |ignored| unknown.push(ignored.to_string()))
            .map_err(|e| SurveyError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

    match unknown.into_iter().next() {
        Some(key) => Err(SurveyError::UnknownSetting {
            key,
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn file(content: &str) -> (PathBuf, String) {
        (PathBuf::from("aa-survey.toml"), content.to_string())
    }

    #[test]
    fn defaults_only() {
        let s = resolve(SettingsInput::default()).unwrap();
        assert_eq!(s.survey, PathBuf::from("Surveyfile.yaml"));
        assert!(!s.check);
        assert_eq!(s.editor, None);
        assert_eq!(s.log_level, "warn");
    }

    #[test]
    fn later_file_wins() {
        let s = resolve(SettingsInput {
            files: vec![
                file("survey = \"a.yaml\"\ncheck = true\n"),
                file("survey = \"b.yaml\"\n"),
            ],
            env_vars: vec![],
        })
        .unwrap();
        assert_eq!(s.survey, PathBuf::from("b.yaml"));
        assert!(s.check);
    }

    #[test]
    fn env_overrides_files() {
        let s = resolve(SettingsInput {
            files: vec![file("editor = \"nano\"\ncheck = true\n")],
            env_vars: vars(&[
                ("AA_SURVEY_EDITOR", "code --wait"),
                ("AA_SURVEY_CHECK", "FALSE"),
                ("OTHER_EDITOR", "ignored"),
            ]),
        })
        .unwrap();
        assert_eq!(s.editor.as_deref(), Some("code --wait"));
        assert!(!s.check);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = resolve(SettingsInput {
            files: vec![file("surve = \"typo.yaml\"\n")],
            env_vars: vec![],
        })
        .unwrap_err();
        match err {
            SurveyError::UnknownSetting { key, .. } => assert_eq!(key, "surve"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = resolve(SettingsInput {
            files: vec![file("survey = \n")],
            env_vars: vec![],
        })
        .unwrap_err();
        assert!(matches!(err, SurveyError::ParseError { .. }));
    }

    #[test]
    fn wrong_type_rejected() {
        let err = resolve(SettingsInput {
            files: vec![],
            env_vars: vars(&[("AA_SURVEY_CHECK", "sometimes")]),
        })
        .unwrap_err();
        assert!(matches!(err, SurveyError::ParseError { .. }));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = discover(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, SurveyError::IoError { .. }));
    }

    #[test]
    fn explicit_file_is_last() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let found = discover(Some(path.as_path())).unwrap();
        assert_eq!(found.last().map(|(p, _)| p.clone()), Some(path));
        assert_eq!(search_paths(Some(dir.path())).last().unwrap(), dir.path());
    }

    #[test]
    fn template_lists_settings() {
        let t = template();
        assert!(t.contains("survey"));
        assert!(t.contains("Surveyfile.yaml"));
        assert!(t.contains("log_level"));
        assert!(t.contains("VISUAL and EDITOR"));
    }
}
