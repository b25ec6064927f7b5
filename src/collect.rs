//! Answer collection: walk the questionnaire and ask each question.

use tracing::debug;

use crate::error::SurveyError;
use crate::prompt::{PromptRequest, Prompter};
use crate::questionnaire::{Question, Questionnaire};
use crate::types::{Answer, Answers, QuestionType};
use crate::validators::{self, expand_path};

/// Ask every question in order and return the answers keyed by target.
///
/// The first error (an interrupt or a prompt failure) stops collection and
/// nothing collected so far is returned.
pub fn collect(
    questionnaire: &Questionnaire,
    prompter: &mut dyn Prompter,
) -> Result<Answers, SurveyError> {
    let mut answers = Answers::new();
    for question in &questionnaire.questions {
        debug!(target_key = %question.target, kind = %question.kind, "asking question");
        let answer = ask(question, prompter)?;
        answers.insert(question.target.clone(), answer);
    }
    Ok(answers)
}

/// Ask a single question.
pub fn ask(question: &Question, prompter: &mut dyn Prompter) -> Result<Answer, SurveyError> {
    let checks = validators::checks_for(question.kind, question.validator);
    let req = PromptRequest {
        message: &question.prompt,
        help: question.help.as_deref(),
        default: question.text_default(),
        checks: &checks,
    };

    let answer = match question.kind {
        QuestionType::Confirm => {
            let default = question.confirm_default()?;
            Answer::Text(prompter.confirm(&req, default)?.to_string())
        }
        QuestionType::Input => Answer::Text(prompter.text(&req)?),
        // Passwords are never pre-filled.
        QuestionType::Password => Answer::Text(prompter.password(&PromptRequest {
            default: None,
            ..req
        })?),
        QuestionType::Select => Answer::Text(prompter.select(&req, &question.options)?),
        QuestionType::MultiSelect => Answer::List(prompter.multi_select(&req, &question.options)?),
        QuestionType::PublicKey | QuestionType::PrivateKey | QuestionType::File | QuestionType::Dir => {
            let raw = prompter.path(&PromptRequest {
                default: None,
                ..req
            })?;
            Answer::Text(expand_path(&raw).to_string_lossy().into_owned())
        }
    };
    Ok(answer)
}
