use std::path::PathBuf;
use thiserror::Error;

use crate::types::{QuestionType, ValidatorKind};

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Unsupported question type \"{kind}\" for '{target}' (allowed types: {allowed})")]
    UnknownQuestionType {
        target: String,
        kind: String,
        allowed: String,
    },

    #[error("Unknown validator \"{validator}\" for '{target}' (allowed validators: password, many, required)")]
    UnknownValidator { target: String, validator: String },

    #[error("Validator \"{validator}\" is not allowed for \"{kind}\" questions ('{target}')")]
    IncompatibleValidator {
        target: String,
        validator: ValidatorKind,
        kind: QuestionType,
    },

    #[error("Question '{target}' of type \"{kind}\" needs at least one option")]
    MissingOptions { target: String, kind: QuestionType },

    #[error("Question \"{prompt}\" has no target key")]
    MissingTarget { prompt: String },

    #[error(
        "Invalid boolean default '{value}' for '{target}' \
         (accepted: 1, t, T, true, TRUE, True, 0, f, F, false, FALSE, False)"
    )]
    InvalidBoolDefault { target: String, value: String },

    #[error("Unsupported output file extension '{extension}' for {path} (supported: .yaml .yml .tf .ini .env)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to parse questionnaire {path}: {source}")]
    QuestionnaireParse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid key '{key}' for {path}: {reason}")]
    InvalidKey {
        key: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Survey interrupted")]
    Interrupted,

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Failed to launch editor '{editor}': {reason}")]
    Editor { editor: String, reason: String },

    #[error("Failed to encode answers: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unknown setting '{key}' in {path}")]
    UnknownSetting { key: String, path: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_lists_allowed_types() {
        let err = SurveyError::UnknownQuestionType {
            target: "db_name".into(),
            kind: "textarea".into(),
            allowed: QuestionType::allowed_list(),
        };
        let msg = err.to_string();
        assert!(msg.contains("textarea"));
        assert!(msg.contains("db_name"));
        assert!(msg.contains("multiselect"));
        assert!(msg.contains("private_key"));
    }

    #[test]
    fn incompatible_validator_names_both_sides() {
        let err = SurveyError::IncompatibleValidator {
            target: "name".into(),
            validator: ValidatorKind::Many,
            kind: QuestionType::Input,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"many\""));
        assert!(msg.contains("\"input\""));
    }

    #[test]
    fn unsupported_format_mentions_extension() {
        let err = SurveyError::UnsupportedFormat {
            path: "/tmp/out.json".into(),
            extension: ".json".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains(".json"));
        assert!(msg.contains(".yaml"));
    }

    #[test]
    fn interrupted_formats() {
        assert!(
            SurveyError::Interrupted
                .to_string()
                .to_lowercase()
                .contains("interrupted")
        );
    }
}
