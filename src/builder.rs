use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::collect;
use crate::editor;
use crate::error::SurveyError;
use crate::persist;
use crate::prompt::Prompter;
use crate::questionnaire::Questionnaire;
use crate::types::{Answers, FileFormat};

/// Questionnaire used when none is configured.
pub const DEFAULT_SURVEY: &str = "Surveyfile.yaml";

/// Entry point for running a survey.
pub struct Survey;

impl Survey {
    pub fn builder() -> SurveyBuilder {
        SurveyBuilder::default()
    }
}

/// Builder for one survey run.
///
/// ```ignore
/// let result = Survey::builder()
///     .questionnaire("Surveyfile.yaml")
///     .output("values.yaml")
///     .post_check(true)
///     .run(&mut InquirePrompter::new())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurveyBuilder {
    questionnaire: Option<PathBuf>,
    output: Option<PathBuf>,
    post_check: bool,
    editor: Option<String>,
}

impl SurveyBuilder {
    /// Questionnaire file to read (default: `Surveyfile.yaml`).
    pub fn questionnaire(mut self, path: impl Into<PathBuf>) -> Self {
        self.questionnaire = Some(path.into());
        self
    }

    /// File to write the answers into. Without one, answers are returned
    /// to the caller instead.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// After writing, ask whether the file is correct and open an editor on
    /// "no". Ignored when there is no output file.
    pub fn post_check(mut self, enabled: bool) -> Self {
        self.post_check = enabled;
        self
    }

    /// Editor to fall back on when neither `VISUAL` nor `EDITOR` is set.
    pub fn editor(mut self, editor: Option<String>) -> Self {
        self.editor = editor;
        self
    }

    fn effective_questionnaire(&self) -> &Path {
        self.questionnaire
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_SURVEY))
    }

    /// Run the survey: validate the output format, load the questionnaire,
    /// ask every question, then write or return the answers.
    ///
    /// The output extension is checked before the questionnaire is even read,
    /// and nothing is written unless every question was answered.
    pub fn run(self, prompter: &mut dyn Prompter) -> Result<SurveyResult, SurveyError> {
        let format = self
            .output
            .as_deref()
            .map(FileFormat::from_path)
            .transpose()?;

        let questionnaire = Questionnaire::load(self.effective_questionnaire())?;
        let answers = collect::collect(&questionnaire, prompter)?;

        let (Some(path), Some(format)) = (self.output, format) else {
            return Ok(SurveyResult::Answers(answers));
        };

        persist::apply_answers(&path, &answers)?;

        let edited = if self.post_check {
            editor::verify(&path, prompter, self.editor.as_deref())?
        } else {
            false
        };
        info!(path = %path.display(), edited, "survey complete");

        Ok(SurveyResult::Written {
            path,
            format,
            count: answers.len(),
            edited,
        })
    }
}

/// Outcome of a survey run.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyResult {
    /// No output file was given; the collected answers.
    Answers(Answers),
    /// Answers were written to a file.
    Written {
        path: PathBuf,
        format: FileFormat,
        count: usize,
        /// Whether the user opened the file in an editor afterwards.
        edited: bool,
    },
}

impl fmt::Display for SurveyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyResult::Answers(answers) => write!(f, "{answers}"),
            SurveyResult::Written {
                path,
                format,
                count,
                ..
            } => write!(f, "Wrote {count} answer(s) to {} ({format})", path.display()),
        }
    }
}
