//! Prompt providers.
//!
//! The collector talks to the terminal only through the [`Prompter`] trait. A
//! provider is responsible for showing the question, applying the request's
//! [`Check`]s and asking again until they pass. Interrupts surface as
//! [`SurveyError::Interrupted`].
//!
//! [`InquirePrompter`] is the terminal implementation, built on
//! [inquire](https://docs.rs/inquire). Tests use a scripted provider instead.

use std::path::MAIN_SEPARATOR;

use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::error::CustomUserError;
use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, MultiSelect, Password, PasswordDisplayMode, Select, Text};

use crate::error::SurveyError;
use crate::validators::{self, Check};

/// Everything a provider needs to render one question.
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    pub message: &'a str,
    pub help: Option<&'a str>,
    /// Pre-filled text, or the option to start on for selects.
    pub default: Option<&'a str>,
    pub checks: &'a [Check],
}

impl<'a> PromptRequest<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            help: None,
            default: None,
            checks: &[],
        }
    }
}

pub trait Prompter {
    fn confirm(&mut self, req: &PromptRequest<'_>, default: bool) -> Result<bool, SurveyError>;

    fn text(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError>;

    /// Like [`text`](Self::text) without echoing input.
    fn password(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError>;

    /// Text entry with filesystem completion. Returns the path as typed.
    fn path(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError>;

    fn select(&mut self, req: &PromptRequest<'_>, options: &[String]) -> Result<String, SurveyError>;

    /// Returns the chosen options in option order.
    fn multi_select(
        &mut self,
        req: &PromptRequest<'_>,
        options: &[String],
    ) -> Result<Vec<String>, SurveyError>;
}

/// Interactive terminal prompts.
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl InquirePrompter {
    pub fn new() -> Self {
        Self
    }
}

fn map_err(err: InquireError) -> SurveyError {
    match err {
        InquireError::OperationInterrupted | InquireError::OperationCanceled => {
            SurveyError::Interrupted
        }
        other => SurveyError::Prompt(other.to_string()),
    }
}

fn text_validator(
    checks: Vec<Check>,
) -> impl Fn(&str) -> Result<Validation, CustomUserError> + Clone {
    move |input: &str| {
        Ok(match validators::check_text(&checks, input) {
            Ok(()) => Validation::Valid,
            Err(msg) => Validation::Invalid(msg.into()),
        })
    }
}

impl Prompter for InquirePrompter {
    fn confirm(&mut self, req: &PromptRequest<'_>, default: bool) -> Result<bool, SurveyError> {
        let mut prompt = Confirm::new(req.message).with_default(default);
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }

    fn text(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
        let mut prompt =
            Text::new(req.message).with_validator(text_validator(req.checks.to_vec()));
        if let Some(default) = req.default {
            prompt = prompt.with_default(default);
        }
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }

    fn password(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
        let mut prompt = Password::new(req.message)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Hidden)
            .with_validator(text_validator(req.checks.to_vec()));
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }

    fn path(&mut self, req: &PromptRequest<'_>) -> Result<String, SurveyError> {
        let mut prompt = Text::new(req.message)
            .with_autocomplete(PathCompleter)
            .with_validator(text_validator(req.checks.to_vec()));
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }

    fn select(&mut self, req: &PromptRequest<'_>, options: &[String]) -> Result<String, SurveyError> {
        let mut prompt = Select::new(req.message, options.to_vec());
        if let Some(cursor) = req
            .default
            .and_then(|d| options.iter().position(|o| o == d))
        {
            prompt = prompt.with_starting_cursor(cursor);
        }
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }

    fn multi_select(
        &mut self,
        req: &PromptRequest<'_>,
        options: &[String],
    ) -> Result<Vec<String>, SurveyError> {
        let checks = req.checks.to_vec();
        let validator =
            move |selected: &[ListOption<&String>]| -> Result<Validation, CustomUserError> {
                Ok(match validators::check_selection(&checks, selected.len()) {
                    Ok(()) => Validation::Valid,
                    Err(msg) => Validation::Invalid(msg.into()),
                })
            };
        let mut prompt = MultiSelect::new(req.message, options.to_vec()).with_validator(validator);
        if let Some(help) = req.help {
            prompt = prompt.with_help_message(help);
        }
        prompt.prompt().map_err(map_err)
    }
}

/// Suggests filesystem entries starting with the typed prefix. A leading `~`
/// is expanded. Directories get a trailing separator so completion can
/// continue into them.
#[derive(Debug, Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn suggestions(input: &str) -> Vec<String> {
        let expanded = shellexpand::tilde(input).to_string();
        let pattern = format!("{}*", glob::Pattern::escape(&expanded));
        let Ok(paths) = glob::glob(&pattern) else {
            return Vec::new();
        };
        paths
            .filter_map(Result::ok)
            .map(|p| {
                let mut s = p.to_string_lossy().into_owned();
                if p.is_dir() && !s.ends_with(MAIN_SEPARATOR) {
                    s.push(MAIN_SEPARATOR);
                }
                s
            })
            .collect()
    }
}

impl Autocomplete for PathCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(Self::suggestions(input))
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        if highlighted_suggestion.is_some() {
            return Ok(highlighted_suggestion);
        }
        let mut suggestions = Self::suggestions(input);
        Ok(if suggestions.len() == 1 {
            suggestions.pop()
        } else {
            None
        })
    }
}
