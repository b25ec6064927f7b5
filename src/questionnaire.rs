//! Questionnaire loading: YAML document to validated, ordered questions.
//!
//! Parsing happens in two steps. The document is first deserialized into loose
//! records whose tags are plain strings, then every record is checked and
//! converted into a [`Question`]. All checks run before the first prompt, so a
//! bad type tag in the last question still aborts the run up front.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml_ng::Value;

use crate::error::SurveyError;
use crate::types::{QuestionType, ValidatorKind};

/// One entry of the `questions:` list as written by the author.
///
/// Scalars are kept as strings here. Fields the tool does not use (such as
/// `answer`) are ignored.
#[derive(Debug, Default, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    prompt: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, deserialize_with = "scalar_string")]
    default: String,
    #[serde(default)]
    target: String,
    #[serde(default)]
    help: String,
    #[serde(default, deserialize_with = "scalar_list")]
    options: Vec<String>,
    #[serde(default)]
    validate: String,
}

#[derive(Debug, Default, Deserialize)]
struct QuestionnaireRecord {
    #[serde(default)]
    questions: Option<Vec<QuestionRecord>>,
}

/// A validated question.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub kind: QuestionType,
    /// Raw default; interpretation depends on `kind`.
    pub default: String,
    pub target: String,
    pub help: Option<String>,
    pub options: Vec<String>,
    pub validator: ValidatorKind,
}

impl Question {
    /// The confirm default as a boolean. See [`parse_bool_default`].
    pub fn confirm_default(&self) -> Result<bool, SurveyError> {
        parse_bool_default(&self.target, &self.default)
    }

    /// Index of the option matching the default, if any.
    pub fn default_option(&self) -> Option<usize> {
        if self.default.is_empty() {
            return None;
        }
        self.options.iter().position(|o| *o == self.default)
    }

    /// The default as a text pre-fill, if one was given.
    pub fn text_default(&self) -> Option<&str> {
        (!self.default.is_empty()).then_some(self.default.as_str())
    }

    fn from_record(record: QuestionRecord) -> Result<Self, SurveyError> {
        if record.target.trim().is_empty() {
            return Err(SurveyError::MissingTarget {
                prompt: record.prompt,
            });
        }

        let kind = QuestionType::from_tag(&record.kind).ok_or_else(|| {
            SurveyError::UnknownQuestionType {
                target: record.target.clone(),
                kind: record.kind.clone(),
                allowed: QuestionType::allowed_list(),
            }
        })?;

        let validator = ValidatorKind::from_tag(&record.validate).ok_or_else(|| {
            SurveyError::UnknownValidator {
                target: record.target.clone(),
                validator: record.validate.clone(),
            }
        })?;

        if !validator.allows(kind) {
            return Err(SurveyError::IncompatibleValidator {
                target: record.target,
                validator,
                kind,
            });
        }

        if kind.needs_options() && record.options.is_empty() {
            return Err(SurveyError::MissingOptions {
                target: record.target,
                kind,
            });
        }

        let question = Question {
            prompt: record.prompt,
            kind,
            default: record.default,
            target: record.target,
            help: (!record.help.is_empty()).then_some(record.help),
            options: record.options,
            validator,
        };

        if kind == QuestionType::Confirm {
            question.confirm_default()?;
        }

        Ok(question)
    }
}

/// An ordered list of validated questions. Order is prompt order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Questionnaire {
    pub questions: Vec<Question>,
}

impl Questionnaire {
    /// Read and validate a questionnaire file.
    pub fn load(path: &Path) -> Result<Self, SurveyError> {
        let content = std::fs::read_to_string(path).map_err(|e| SurveyError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Parse and validate questionnaire text. `path` is used for diagnostics.
    pub fn parse(content: &str, path: &Path) -> Result<Self, SurveyError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let record: QuestionnaireRecord =
            serde_yaml_ng::from_str(content).map_err(|e| SurveyError::QuestionnaireParse {
                path: PathBuf::from(path),
                source: e,
            })?;

        let questions = record
            .questions
            .unwrap_or_default()
            .into_iter()
            .map(Question::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parse a confirm default.
///
/// Accepts `1 t T true TRUE True 0 f F false FALSE False`. The empty string
/// means `true`. Anything else is a configuration error.
pub fn parse_bool_default(target: &str, value: &str) -> Result<bool, SurveyError> {
    match value {
        "" => Ok(true),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(SurveyError::InvalidBoolDefault {
            target: target.into(),
            value: value.into(),
        }),
    }
}

fn scalar_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(s),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err("expected a scalar value".into()),
    }
}

/// Accept any YAML scalar (`default: true`, `default: 8080`) as a string.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value).map_err(serde::de::Error::custom)
}

fn scalar_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    values
        .into_iter()
        .map(|v| scalar_to_string(v).map_err(serde::de::Error::custom))
        .collect()
}
