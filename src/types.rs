//! Core value types shared by the collector and the patchers.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::SurveyError;

/// The kind of prompt a question renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Confirm,
    Input,
    Password,
    Select,
    MultiSelect,
    PublicKey,
    PrivateKey,
    File,
    Dir,
}

impl QuestionType {
    pub const ALL: [QuestionType; 9] = [
        QuestionType::Confirm,
        QuestionType::Input,
        QuestionType::Password,
        QuestionType::Select,
        QuestionType::MultiSelect,
        QuestionType::PublicKey,
        QuestionType::PrivateKey,
        QuestionType::File,
        QuestionType::Dir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Confirm => "confirm",
            QuestionType::Input => "input",
            QuestionType::Password => "password",
            QuestionType::Select => "select",
            QuestionType::MultiSelect => "multiselect",
            QuestionType::PublicKey => "public_key",
            QuestionType::PrivateKey => "private_key",
            QuestionType::File => "file",
            QuestionType::Dir => "dir",
        }
    }

    /// Look up a type by its questionnaire tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Comma-separated list of every accepted tag, for diagnostics.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Types answered by typing a filesystem path.
    pub fn is_path(self) -> bool {
        matches!(
            self,
            QuestionType::PublicKey | QuestionType::PrivateKey | QuestionType::File | QuestionType::Dir
        )
    }

    pub fn needs_options(self) -> bool {
        matches!(self, QuestionType::Select | QuestionType::MultiSelect)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional validation rule attached to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidatorKind {
    #[default]
    None,
    /// At least 8 characters. Only valid on `password` questions.
    Password,
    /// At least 2 selections. Only valid on `multiselect` questions.
    Many,
    /// Non-empty answer. Valid on every type.
    Required,
}

impl ValidatorKind {
    /// Absent and empty tags both mean no validator.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" | "none" => Some(ValidatorKind::None),
            "password" => Some(ValidatorKind::Password),
            "many" => Some(ValidatorKind::Many),
            "required" => Some(ValidatorKind::Required),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValidatorKind::None => "none",
            ValidatorKind::Password => "password",
            ValidatorKind::Many => "many",
            ValidatorKind::Required => "required",
        }
    }

    /// Whether this validator may be attached to a question of `kind`.
    pub fn allows(self, kind: QuestionType) -> bool {
        match self {
            ValidatorKind::None | ValidatorKind::Required => true,
            ValidatorKind::Password => kind == QuestionType::Password,
            ValidatorKind::Many => kind == QuestionType::MultiSelect,
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single collected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    /// Multiselect choices, in option order.
    List(Vec<String>),
}

impl Answer {
    /// Flat rendering used by formats without native sequences.
    pub fn joined(&self) -> String {
        match self {
            Answer::Text(s) => s.clone(),
            Answer::List(items) => items.join(","),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(s) => f.write_str(s),
            Answer::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Answer::List(items)
    }
}

/// Target key to answer, in questionnaire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers(IndexMap<String, Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. A repeated target keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, answer: impl Into<Answer>) {
        self.0.insert(key.into(), answer.into());
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Answer>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (k, v) in iter {
            answers.insert(k, v);
        }
        answers
    }
}

/// Renders one `key: value` line per answer.
impl fmt::Display for Answers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

/// Output file format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Hcl,
    Ini,
    DotEnv,
}

impl FileFormat {
    /// Detect the format of `path` from the text after the last dot of its
    /// file name, so a bare `.env` counts as dotenv. Case-sensitive.
    pub fn from_path(path: &Path) -> Result<Self, SurveyError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let ext = name.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        match ext {
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "tf" => Ok(FileFormat::Hcl),
            "ini" => Ok(FileFormat::Ini),
            "env" => Ok(FileFormat::DotEnv),
            _ => Err(SurveyError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: if ext.is_empty() {
                    String::new()
                } else {
                    format!(".{ext}")
                },
            }),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Yaml => "yaml",
            FileFormat::Hcl => "hcl",
            FileFormat::Ini => "ini",
            FileFormat::DotEnv => "dotenv",
        };
        f.write_str(name)
    }
}
